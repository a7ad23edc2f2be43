//! Damage formula.
//!
//! # Formula
//!
//! ```text
//! power(stat) = scale × tanh(slope × stat − offset) + shift
//!
//! ratio = (power(attacker) − power(defender)) / ratio_scale
//! ratio < 0  → lerp(min, avg, 1 − |ratio|)
//! ratio ≥ 0  → lerp(avg, max, ratio)
//! clamp to [min, max]
//!
//! total = Σ by_stat(triple) × weight
//! total ± jitter × total
//! total × attacker damage multiplier
//! total × (1 + lerp(−span, +span, min(level, cap) / cap))
//! round
//! ```
//!
//! Balance parameters come from [`FormulaConfig`].

use crate::config::FormulaConfig;
use crate::rng::FightRng;
use crate::state::Combatant;

use super::result::{HitKind, SecondaryEffect};

/// Damage interval of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackInfo {
    pub min_damage: u32,
    pub average_damage: u32,
    pub max_damage: u32,
}

impl AttackInfo {
    pub const fn new(min_damage: u32, average_damage: u32, max_damage: u32) -> Self {
        Self {
            min_damage,
            average_damage,
            max_damage,
        }
    }

    /// `min <= avg <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min_damage <= self.average_damage && self.average_damage <= self.max_damage
    }
}

/// One resolved (attacker stat, defender stat, weight) input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatTriple {
    pub attacker: f64,
    pub defender: f64,
    pub weight: f64,
}

impl StatTriple {
    pub const fn new(attacker: f64, defender: f64, weight: f64) -> Self {
        Self {
            attacker,
            defender,
            weight,
        }
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Damage formula bound to a set of balance constants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamageFormula {
    config: FormulaConfig,
}

impl DamageFormula {
    pub fn new(config: FormulaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }

    /// Bounded, diminishing-returns score of a raw stat.
    pub fn power(&self, stat: f64) -> f64 {
        let c = &self.config;
        c.power_scale * (c.power_slope * stat - c.power_offset).tanh() + c.power_shift
    }

    /// Damage for a single stat pair, always inside `[min, max]`.
    pub fn by_stat(&self, attacker_stat: f64, defender_stat: f64, info: &AttackInfo) -> f64 {
        let min = f64::from(info.min_damage);
        let avg = f64::from(info.average_damage);
        let max = f64::from(info.max_damage);

        let ratio = (self.power(attacker_stat) - self.power(defender_stat)) / self.config.ratio_scale;

        let damage = if ratio < 0.0 {
            lerp(min, avg, 1.0 - ratio.abs())
        } else {
            lerp(avg, max, ratio)
        };

        damage.clamp(min, max)
    }

    /// Level bonus ratio, from `-span` at level 0 to `+span` at the level cap.
    pub fn level_bonus(&self, level: u32) -> f64 {
        let cap = self.config.level_cap.max(1);
        let t = f64::from(level.min(cap)) / f64::from(cap);
        lerp(-self.config.level_bonus_span, self.config.level_bonus_span, t)
    }

    /// Full damage of an attack before secondary effects.
    ///
    /// An empty `stats` slice deals no damage.
    pub fn total_damage(
        &self,
        stats: &[StatTriple],
        attacker: &Combatant,
        info: &AttackInfo,
        rng: &mut FightRng,
    ) -> u32 {
        let mut damage: f64 = stats
            .iter()
            .map(|t| self.by_stat(t.attacker, t.defender, info) * t.weight)
            .sum();

        let jitter = damage * self.config.jitter;
        damage += rng.range_f64(-jitter, jitter);

        damage *= attacker.damage_multiplier();
        damage *= 1.0 + self.level_bonus(attacker.level);

        round_damage(damage)
    }

    /// Crit / miss resolution with one shared roll in `[0, 100)`.
    ///
    /// The crit check is evaluated first; the two outcomes are exclusive.
    pub fn secondary_effects(
        &self,
        damage: u32,
        crit_chance: f64,
        miss_chance: f64,
        rng: &mut FightRng,
    ) -> SecondaryEffect {
        let roll = rng.roll_percent();

        if roll < crit_chance {
            return SecondaryEffect {
                kind: HitKind::Critical,
                damage: round_damage(f64::from(damage) * self.config.crit_multiplier),
            };
        }

        if roll < crit_chance + miss_chance {
            let divisor = rng.pick(&self.config.miss_divisors).copied().unwrap_or(0.0);
            return SecondaryEffect {
                kind: HitKind::Missed,
                damage: round_damage(f64::from(damage) * divisor),
            };
        }

        SecondaryEffect {
            kind: HitKind::Normal,
            damage,
        }
    }
}

/// Round to the nearest integer, flooring negatives at zero.
pub(crate) fn round_damage(damage: f64) -> u32 {
    if damage.is_nan() {
        return 0;
    }
    damage.round().max(0.0) as u32
}
