//! Overtime escalation of the scripted side.

use crate::config::EscalationConfig;
use crate::state::Combatant;
use crate::stats::{StatKind, StatModifier};

/// Escalate `target` for one of its own overtime turns.
///
/// The first call also applies the one-time stat step-up; every call pushes a
/// decaying damage multiplier.
pub fn escalate(target: &mut Combatant, config: &EscalationConfig, first: bool) {
    if first {
        for stat in [StatKind::Attack, StatKind::Defense, StatKind::Speed] {
            target.apply_modifier(stat, StatModifier::multiply(config.stat_step_up));
        }
    }
    target.push_damage_multiplier(config.damage_multiplier, config.damage_multiplier_turns);
}
