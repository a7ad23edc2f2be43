//! Stat modifier pipeline.
//!
//! Each stat owns an ordered list of modifiers. Reading a stat folds its base
//! value through the list in insertion order:
//!
//! ```text
//! value = base
//! for m in modifiers[stat]:
//!     Add      => value += m.value
//!     Multiply => value *= m.value
//! value = max(value, 0)
//! ```
//!
//! Modifiers last for the whole fight unless an action clears them by origin.

use crate::action::ActionId;

use super::core::StatKind;

/// How a modifier combines with the running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ModifierOp {
    Add,
    Multiply,
}

/// A single stat modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub op: ModifierOp,
    pub value: f64,
    /// Action that produced the modifier; `None` for weather and overtime.
    pub origin: Option<ActionId>,
}

impl StatModifier {
    pub fn add(value: f64) -> Self {
        Self {
            op: ModifierOp::Add,
            value,
            origin: None,
        }
    }

    pub fn multiply(value: f64) -> Self {
        Self {
            op: ModifierOp::Multiply,
            value,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: ActionId) -> Self {
        self.origin = Some(origin);
        self
    }

    fn fold(&self, total: f64) -> f64 {
        match self.op {
            ModifierOp::Add => total + self.value,
            ModifierOp::Multiply => total * self.value,
        }
    }
}

/// Ordered modifier lists, one per stat.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierPipeline {
    attack: Vec<StatModifier>,
    defense: Vec<StatModifier>,
    speed: Vec<StatModifier>,
}

impl ModifierPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a modifier to the end of the stat's list.
    pub fn apply(&mut self, stat: StatKind, modifier: StatModifier) {
        self.list_mut(stat).push(modifier);
    }

    /// Fold `base` through the stat's modifiers, clamped to non-negative.
    pub fn resolve(&self, stat: StatKind, base: f64) -> f64 {
        self.list(stat)
            .iter()
            .fold(base, |total, modifier| modifier.fold(total))
            .max(0.0)
    }

    /// Modifiers currently held for a stat, in application order.
    pub fn modifiers(&self, stat: StatKind) -> &[StatModifier] {
        self.list(stat)
    }

    /// Remove every modifier produced by `origin`, across all stats.
    ///
    /// Returns the number of removed modifiers. Relative order of the
    /// remaining modifiers is preserved.
    pub fn remove_by_origin(&mut self, origin: &ActionId) -> usize {
        let mut removed = 0;
        for list in [&mut self.attack, &mut self.defense, &mut self.speed] {
            let before = list.len();
            list.retain(|m| m.origin.as_ref() != Some(origin));
            removed += before - list.len();
        }
        removed
    }

    /// Total number of modifiers held.
    pub fn len(&self) -> usize {
        self.attack.len() + self.defense.len() + self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list(&self, stat: StatKind) -> &Vec<StatModifier> {
        match stat {
            StatKind::Attack => &self.attack,
            StatKind::Defense => &self.defense,
            StatKind::Speed => &self.speed,
        }
    }

    fn list_mut(&mut self, stat: StatKind) -> &mut Vec<StatModifier> {
        match stat {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
        }
    }
}
