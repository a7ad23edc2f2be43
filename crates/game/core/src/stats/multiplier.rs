//! Decaying damage multipliers.
//!
//! Kept apart from stat modifiers: each entry multiplies outgoing damage for a
//! limited number of turns and is dropped once its counter runs out.

/// A damage multiplier with a remaining lifetime in turns.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageMultiplier {
    pub value: f64,
    pub turns: u32,
}

/// Active damage multipliers of one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageMultipliers {
    entries: Vec<DamageMultiplier>,
}

impl DamageMultipliers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a multiplier. Zero-turn multipliers are ignored.
    pub fn push(&mut self, value: f64, turns: u32) {
        if turns > 0 {
            self.entries.push(DamageMultiplier { value, turns });
        }
    }

    /// Product of all active multipliers (1.0 when none).
    pub fn product(&self) -> f64 {
        self.entries.iter().map(|m| m.value).product()
    }

    /// Advance one turn: decrement every counter and drop expired entries.
    pub fn tick(&mut self) {
        for entry in &mut self.entries {
            entry.turns = entry.turns.saturating_sub(1);
        }
        self.entries.retain(|m| m.turns > 0);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
