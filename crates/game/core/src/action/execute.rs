//! Pure action resolution.
//!
//! [`resolve_action`] applies one descriptor to an (attacker, defender) pair.
//! Breath has already been paid by the caller; history is recorded by the
//! caller as well. Resolution order:
//!
//! ```text
//! 1. effect        damage / rest / charge / cleanse / rage
//! 2. buffs         skipped for inert effects
//! 3. alteration    skipped for inert effects and missed hits
//! ```

use crate::alteration::Alteration;
use crate::combat::formula::round_damage;
use crate::combat::{DamageFormula, HitKind, StatTriple};
use crate::config::FightConfig;
use crate::error::ResolveError;
use crate::rng::FightRng;
use crate::state::Combatant;
use crate::stats::StatModifier;

use super::registry::ActionRegistry;
use super::types::{ActionDescriptor, ActionEffect, ActionId, Side, StatSource, Target};

/// Read-only collaborators of a resolution.
#[derive(Clone, Copy, Debug)]
pub struct ActionContext<'a> {
    pub registry: &'a ActionRegistry,
    pub formula: &'a DamageFormula,
    pub config: &'a FightConfig,
}

/// What a resolved action did.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub action: ActionId,
    /// Crit/miss branch, for effects that rolled one.
    pub hit: Option<HitKind>,
    /// Fight points removed from the defender.
    pub damage: u32,
    /// Fight points removed from the user by recoil.
    pub recoil: u32,
    pub healed: u32,
    pub breath_restored: u32,
    pub buffs_applied: usize,
    pub modifiers_cleared: usize,
    /// Alteration newly applied, with the side it landed on.
    pub alteration: Option<(Alteration, Target)>,
    /// Action queued for the user's next turn.
    pub queued: Option<ActionId>,
    /// Whether the consecutive-use penalty reduced the damage.
    pub penalised: bool,
}

/// Resolve `action` with `attacker` acting against `defender`.
pub fn resolve_action(
    action: &ActionDescriptor,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    ctx: ActionContext<'_>,
    rng: &mut FightRng,
) -> Result<ActionOutcome, ResolveError> {
    let mut outcome = ActionOutcome {
        action: action.id.clone(),
        ..ActionOutcome::default()
    };

    match &action.effect {
        ActionEffect::NoAction | ActionEffect::OutOfBreath | ActionEffect::Support => {}
        ActionEffect::Damage => strike(action, attacker, defender, ctx, rng, &mut outcome)?,
        ActionEffect::Rest {
            breath,
            heal_percent,
        } => {
            outcome.breath_restored = attacker.restore_breath(*breath);
            let amount = u64::from(attacker.fight_points().maximum) * u64::from(*heal_percent) / 100;
            outcome.healed = attacker.heal(u32::try_from(amount).unwrap_or(u32::MAX));
        }
        ActionEffect::Charge { follow_up } => {
            if !ctx.registry.contains(follow_up) {
                return Err(ResolveError::UnknownFollowUp {
                    action: action.id.clone(),
                    follow_up: follow_up.clone(),
                });
            }
            attacker.queue_action(follow_up.clone());
            outcome.queued = Some(follow_up.clone());
        }
        ActionEffect::Cleanse { origin, target } => {
            outcome.modifiers_cleared =
                select(*target, attacker, defender).clear_modifiers_from(origin);
        }
        ActionEffect::Rage => {
            let points = attacker.take_rage();
            let damage = round_damage(f64::from(points) * ctx.config.rage.damage_per_point);
            outcome.damage = defender.take_damage(damage);
        }
    }

    if action.effect.is_inert() {
        return Ok(outcome);
    }

    for buff in &action.buffs {
        let modifier = StatModifier {
            op: buff.op,
            value: buff.value,
            origin: Some(action.id.clone()),
        };
        select(buff.target, attacker, defender).apply_modifier(buff.stat, modifier);
        outcome.buffs_applied += 1;
    }

    if let Some(alteration) = &action.alteration
        && outcome.hit != Some(HitKind::Missed)
        && rng.roll_percent() < alteration.chance
        && select(alteration.target, attacker, defender).apply_alteration(alteration.kind)
    {
        outcome.alteration = Some((alteration.kind, alteration.target));
    }

    Ok(outcome)
}

fn strike(
    action: &ActionDescriptor,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    ctx: ActionContext<'_>,
    rng: &mut FightRng,
    outcome: &mut ActionOutcome,
) -> Result<(), ResolveError> {
    let info = action
        .attack
        .as_ref()
        .ok_or_else(|| ResolveError::MissingAttackInfo(action.id.clone()))?;
    if action.stats.is_empty() {
        return Err(ResolveError::MissingStatInputs(action.id.clone()));
    }

    let read = |source: StatSource| match source.side {
        Side::Attacker => attacker.stat(source.stat),
        Side::Defender => defender.stat(source.stat),
    };
    let triples: Vec<StatTriple> = action
        .stats
        .iter()
        .map(|input| StatTriple::new(read(input.attacker), read(input.defender), input.weight))
        .collect();

    let mut damage = ctx.formula.total_damage(&triples, attacker, info, rng);

    let penalty = &ctx.config.repeat_penalty;
    if action.repeat_penalty && attacker.consecutive_uses(&action.id) >= penalty.threshold {
        damage = round_damage(f64::from(damage) * penalty.factor);
        outcome.penalised = true;
    }

    let secondary = ctx
        .formula
        .secondary_effects(damage, action.crit_chance, action.miss_chance, rng);
    outcome.hit = Some(secondary.kind);
    outcome.damage = defender.take_damage(secondary.damage);

    if action.recoil > 0.0 {
        outcome.recoil = attacker.take_damage(round_damage(f64::from(outcome.damage) * action.recoil));
    }

    Ok(())
}

fn select<'a>(target: Target, user: &'a mut Combatant, opponent: &'a mut Combatant) -> &'a mut Combatant {
    match target {
        Target::User => user,
        Target::Opponent => opponent,
    }
}
