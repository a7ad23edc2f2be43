//! Action descriptor types.
//!
//! Descriptors are plain data. Everything an action does at fight time is
//! derived from these fields by [`resolve_action`](super::resolve_action).

use std::fmt;

use crate::alteration::Alteration;
use crate::combat::AttackInfo;
use crate::stats::{ModifierOp, StatKind};

// ============================================================================
// Action Id
// ============================================================================

/// Identifier of an action in the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(String);

impl ActionId {
    /// Builtin no-op, also the fallback for unknown ids.
    pub const NONE: &'static str = "none";
    /// Builtin reduced action substituted when breath runs short.
    pub const OUT_OF_BREATH: &'static str = "outOfBreath";
    /// Builtin bonus action fed by banked rage.
    pub const RAGE: &'static str = "rage";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn none() -> Self {
        Self::new(Self::NONE)
    }

    pub fn out_of_breath() -> Self {
        Self::new(Self::OUT_OF_BREATH)
    }

    pub fn rage() -> Self {
        Self::new(Self::RAGE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Effect
// ============================================================================

/// Which combatant a stat input, buff or alteration refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Target {
    /// The acting combatant.
    User,
    /// The defending combatant.
    #[default]
    Opponent,
}

/// What an action does when it resolves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    /// Standard formula attack.
    #[default]
    Damage,
    /// Buffs and alterations only, no damage roll.
    Support,
    /// Does nothing.
    NoAction,
    /// Reduced effect substituted for an unaffordable action.
    OutOfBreath,
    /// Recover breath and a share of maximum fight points.
    Rest { breath: u32, heal_percent: u32 },
    /// Queue `follow_up` as the user's next action.
    Charge { follow_up: ActionId },
    /// Remove every modifier produced by `origin` from `target`.
    Cleanse { origin: ActionId, target: Target },
    /// Spend banked rage for fixed bonus damage.
    Rage,
}

impl ActionEffect {
    /// Effects that never carry buffs or alterations.
    pub fn is_inert(&self) -> bool {
        matches!(self, ActionEffect::NoAction | ActionEffect::OutOfBreath)
    }
}

// ============================================================================
// Stat inputs and buffs
// ============================================================================

/// Which combatant side a stat is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

/// A stat read from one side of the fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSource {
    pub side: Side,
    pub stat: StatKind,
}

impl StatSource {
    pub const fn attacker(stat: StatKind) -> Self {
        Self {
            side: Side::Attacker,
            stat,
        }
    }

    pub const fn defender(stat: StatKind) -> Self {
        Self {
            side: Side::Defender,
            stat,
        }
    }
}

/// One weighted (attacker-side stat, defender-side stat) pair.
///
/// Both sources may point at the same combatant, which allows asymmetric
/// actions (e.g. an attack scaled on the user's own defense).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatInput {
    pub attacker: StatSource,
    pub defender: StatSource,
    pub weight: f64,
}

impl StatInput {
    /// Attack against defense, weight 1.
    pub const fn standard() -> Self {
        Self {
            attacker: StatSource::attacker(StatKind::Attack),
            defender: StatSource::defender(StatKind::Defense),
            weight: 1.0,
        }
    }
}

/// A stat modifier applied by an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub stat: StatKind,
    pub op: ModifierOp,
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Target,
}

/// Alteration an action may inflict, with its chance in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterationChance {
    pub kind: Alteration,
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Target,
}

// ============================================================================
// Descriptor
// ============================================================================

/// Catalog entry of an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionDescriptor {
    pub id: ActionId,
    pub breath_cost: u32,
    pub effect: ActionEffect,
    pub attack: Option<AttackInfo>,
    pub stats: Vec<StatInput>,
    /// Critical hit chance in percent.
    pub crit_chance: f64,
    /// Miss chance in percent.
    pub miss_chance: f64,
    /// Fraction of dealt damage reflected to the user.
    pub recoil: f64,
    pub buffs: Vec<Buff>,
    pub alteration: Option<AlterationChance>,
    /// Subject to the consecutive-use damage penalty.
    pub repeat_penalty: bool,
    /// Weight of this action in scripted selection.
    pub ai_weight: u32,
}

impl ActionDescriptor {
    pub const DEFAULT_AI_WEIGHT: u32 = 10;

    pub fn new(id: impl Into<ActionId>, effect: ActionEffect) -> Self {
        Self {
            id: id.into(),
            effect,
            ..Self::default()
        }
    }

    /// Standard attack-vs-defense damage action.
    pub fn attack(id: impl Into<ActionId>, info: AttackInfo) -> Self {
        Self {
            attack: Some(info),
            stats: vec![StatInput::standard()],
            ..Self::new(id, ActionEffect::Damage)
        }
    }

    pub fn with_cost(mut self, breath_cost: u32) -> Self {
        self.breath_cost = breath_cost;
        self
    }

    pub fn with_chances(mut self, crit_chance: f64, miss_chance: f64) -> Self {
        self.crit_chance = crit_chance;
        self.miss_chance = miss_chance;
        self
    }

    pub fn with_buff(mut self, buff: Buff) -> Self {
        self.buffs.push(buff);
        self
    }

    pub fn with_alteration(mut self, kind: Alteration, chance: f64, target: Target) -> Self {
        self.alteration = Some(AlterationChance {
            kind,
            chance,
            target,
        });
        self
    }

    pub fn with_recoil(mut self, recoil: f64) -> Self {
        self.recoil = recoil;
        self
    }

    pub fn with_repeat_penalty(mut self) -> Self {
        self.repeat_penalty = true;
        self
    }

    pub fn with_ai_weight(mut self, ai_weight: u32) -> Self {
        self.ai_weight = ai_weight;
        self
    }
}

impl Default for ActionDescriptor {
    fn default() -> Self {
        Self {
            id: ActionId::none(),
            breath_cost: 0,
            effect: ActionEffect::Damage,
            attack: None,
            stats: Vec::new(),
            crit_chance: 0.0,
            miss_chance: 0.0,
            recoil: 0.0,
            buffs: Vec::new(),
            alteration: None,
            repeat_penalty: false,
            ai_weight: Self::DEFAULT_AI_WEIGHT,
        }
    }
}
