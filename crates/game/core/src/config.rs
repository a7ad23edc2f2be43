//! Fight configuration constants and tunable parameters.
//!
//! Every balancing knob of the engine lives here so content files (TOML) can
//! override it without touching the rules. All structs implement `Default`
//! with the reference values, and with the `serde` feature every field is
//! optional in serialized form.

/// What happens once the turn counter passes [`FightConfig::max_turns`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum OvertimePolicy {
    /// End the fight as a draw when the maximum is reached.
    #[default]
    Draw,
    /// Keep fighting, but make the scripted side stronger every overtime turn.
    EscalateScripted,
}

/// Constants of the damage formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormulaConfig {
    /// Amplitude of the power curve.
    pub power_scale: f64,
    /// Slope applied to the raw stat inside `tanh`.
    pub power_slope: f64,
    /// Offset subtracted inside `tanh`.
    pub power_offset: f64,
    /// Constant added after the curve.
    pub power_shift: f64,
    /// Divisor turning a power difference into an interpolation ratio.
    pub ratio_scale: f64,
    /// Random jitter as a fraction of the total (0.05 = ±5%).
    pub jitter: f64,
    /// Damage multiplier of a critical hit.
    pub crit_multiplier: f64,
    /// Divisors applied to a missed attack, one picked at random.
    pub miss_divisors: Vec<f64>,
    /// Level at which the level bonus stops growing.
    pub level_cap: u32,
    /// Half-width of the level bonus interval (-span at level 0, +span at the cap).
    pub level_bonus_span: f64,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            power_scale: 100.0,
            power_slope: 0.0023,
            power_offset: 0.03,
            power_shift: 3.0,
            ratio_scale: 50.0,
            jitter: 0.05,
            crit_multiplier: 1.5,
            miss_divisors: vec![0.25, 0.2, 0.125, 0.1, 0.0],
            level_cap: 75,
            level_bonus_span: 0.55,
        }
    }
}

/// Overtime escalation applied to the scripted side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EscalationConfig {
    /// One-time multiplicative step-up on attack, defense and speed.
    pub stat_step_up: f64,
    /// Damage multiplier pushed on each of the scripted fighter's overtime turns.
    pub damage_multiplier: f64,
    /// Number of its own turns each pushed multiplier lasts.
    pub damage_multiplier_turns: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            stat_step_up: 1.2,
            damage_multiplier: 1.1,
            damage_multiplier_turns: 5,
        }
    }
}

/// Rage bonus action tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RageConfig {
    /// Damage dealt per banked rage point.
    pub damage_per_point: f64,
}

impl Default for RageConfig {
    fn default() -> Self {
        Self {
            damage_per_point: 8.0,
        }
    }
}

/// Penalty for spamming the same action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RepeatPenaltyConfig {
    /// Number of immediately preceding identical uses that trigger the penalty.
    pub threshold: usize,
    /// Damage factor of a penalised use.
    pub factor: f64,
}

impl Default for RepeatPenaltyConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            factor: 0.3,
        }
    }
}

/// Fight configuration shared by the controller and the rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FightConfig {
    /// Number of turns played before the overtime policy applies.
    pub max_turns: u32,
    pub overtime: OvertimePolicy,
    /// Safety cap under [`OvertimePolicy::EscalateScripted`]; reaching it is a draw.
    pub hard_turn_limit: u32,
    /// Maximum wait for a human-driven choice, in milliseconds.
    pub choice_timeout_ms: u64,
    /// Scripted fighter "thinking" delay, in milliseconds.
    pub thinking_delay_ms: u64,
    /// Probability (0..=1) that an unaffordable action is downgraded.
    pub out_of_breath_chance: f64,
    pub formula: FormulaConfig,
    pub overtime_escalation: EscalationConfig,
    pub rage: RageConfig,
    pub repeat_penalty: RepeatPenaltyConfig,
    /// Friendly fights carry no rewards; the flag is forwarded to persistence.
    pub friendly: bool,
    /// Seed for the fight RNG. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl FightConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 24;
    pub const DEFAULT_CHOICE_TIMEOUT_MS: u64 = 30_000;
    pub const DEFAULT_THINKING_DELAY_MS: u64 = 300;
    pub const DEFAULT_OUT_OF_BREATH_CHANCE: f64 = 0.8;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            overtime: OvertimePolicy::Draw,
            hard_turn_limit: Self::DEFAULT_MAX_TURNS * 3,
            choice_timeout_ms: Self::DEFAULT_CHOICE_TIMEOUT_MS,
            thinking_delay_ms: Self::DEFAULT_THINKING_DELAY_MS,
            out_of_breath_chance: Self::DEFAULT_OUT_OF_BREATH_CHANCE,
            formula: FormulaConfig::default(),
            overtime_escalation: EscalationConfig::default(),
            rage: RageConfig::default(),
            repeat_penalty: RepeatPenaltyConfig::default(),
            friendly: false,
            seed: None,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self.hard_turn_limit = self.hard_turn_limit.max(max_turns);
        self
    }

    pub fn with_overtime(mut self, overtime: OvertimePolicy) -> Self {
        self.overtime = overtime;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether the turn counter has gone past the configured maximum.
    pub fn max_turns_reached(&self, turn: u32) -> bool {
        turn > self.max_turns
    }
}

impl Default for FightConfig {
    fn default() -> Self {
        Self::new()
    }
}
