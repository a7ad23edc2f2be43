//! Alteration (status effect) state machine.
//!
//! A combatant holds at most one alteration. It is applied only when the
//! target currently has none, and it runs automatically at the start of the
//! holder's turn without consuming the holder's choice.
//!
//! # Transitions
//!
//! ```text
//! NONE ──apply──▶ POISONED | CONFUSED | STUNNED | WEAK
//!
//! every holder turn: counter += 1, then
//!   POISONED  counter > 1 && 25%  → NONE
//!             otherwise           → self-damage (formula, fixed bounds)
//!   CONFUSED  counter > 1 && 35%  → NONE
//!             else 35%            → replace this turn's action with a random one
//!             else 15%            → self-hit, forced no-op
//!             else                → dazed, no effect
//!   STUNNED   counter > 1         → NONE
//!             otherwise           → forced no-op
//!   WEAK      counter > 1 && 25%  → NONE
//!             otherwise           → attack halved while active
//! ```
//!
//! The counter is reset to 0 on (re)application, so an alteration always acts
//! at least once before it can be cured.

use crate::action::ActionId;
use crate::combat::{AttackInfo, DamageFormula};
use crate::combat::formula::round_damage;
use crate::rng::FightRng;
use crate::state::Combatant;

/// Status effects a combatant can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Alteration {
    #[default]
    None,
    Poisoned,
    Confused,
    Stunned,
    Weak,
}

impl Alteration {
    pub const POISON_CURE_CHANCE: f64 = 25.0;
    pub const CONFUSION_CURE_CHANCE: f64 = 35.0;
    pub const CONFUSION_RANDOM_ACTION_CHANCE: f64 = 35.0;
    pub const CONFUSION_SELF_HIT_CHANCE: f64 = 15.0;
    pub const WEAK_CURE_CHANCE: f64 = 25.0;

    /// Attack factor applied while [`Alteration::Weak`] is active.
    pub const WEAK_ATTACK_FACTOR: f64 = 0.5;

    /// Fixed attacker-side stat of the poison.
    pub const POISON_POTENCY: f64 = 80.0;
    pub const POISON_ATTACK: AttackInfo = AttackInfo::new(10, 20, 35);
    pub const CONFUSION_SELF_HIT: AttackInfo = AttackInfo::new(5, 10, 15);

    pub fn is_none(&self) -> bool {
        matches!(self, Alteration::None)
    }
}

/// Current alteration plus its per-application turn counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterationState {
    kind: Alteration,
    turns: u32,
}

impl AlterationState {
    pub fn kind(&self) -> Alteration {
        self.kind
    }

    /// Number of holder turns this alteration has been active.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_active(&self) -> bool {
        !self.kind.is_none()
    }

    /// Set a new alteration and reset the counter.
    pub fn set(&mut self, kind: Alteration) {
        self.kind = kind;
        self.turns = 0;
    }

    pub fn clear(&mut self) {
        self.set(Alteration::None);
    }

    fn tick(&mut self) -> u32 {
        self.turns += 1;
        self.turns
    }
}

/// What an alteration did at the start of its holder's turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterationEffect {
    /// The alteration wore off.
    Cured(Alteration),
    /// Poison damage dealt to the holder.
    Poisoned { damage: u32 },
    /// Confusion replaced this turn's action.
    ConfusedAction { action: ActionId },
    /// Confusion made the holder hit itself and lose the turn.
    ConfusedSelfHit { damage: u32 },
    /// Confusion had no mechanical effect this turn.
    Dazed,
    /// Stun forces a no-op this turn.
    Stunned,
    /// Weakness keeps the holder's attack reduced.
    Weakened,
}

/// Run the holder's alteration for the start of its turn.
///
/// Returns `None` when the holder has no alteration. Damage is applied to the
/// holder directly; forced or replaced actions are queued on the holder.
pub fn execute_alteration(
    holder: &mut Combatant,
    formula: &DamageFormula,
    rng: &mut FightRng,
) -> Option<AlterationEffect> {
    let kind = holder.alteration().kind();
    if kind.is_none() {
        return None;
    }

    let turns = holder.alteration_mut().tick();
    let may_cure = turns > 1;

    let effect = match kind {
        Alteration::None => return None,
        Alteration::Poisoned => {
            if may_cure && rng.roll_percent() < Alteration::POISON_CURE_CHANCE {
                cure(holder, kind)
            } else {
                let damage = round_damage(formula.by_stat(
                    Alteration::POISON_POTENCY,
                    holder.defense(),
                    &Alteration::POISON_ATTACK,
                ));
                holder.take_damage(damage);
                AlterationEffect::Poisoned { damage }
            }
        }
        Alteration::Confused => {
            if may_cure && rng.roll_percent() < Alteration::CONFUSION_CURE_CHANCE {
                cure(holder, kind)
            } else {
                confusion(holder, formula, rng)
            }
        }
        Alteration::Stunned => {
            if may_cure {
                cure(holder, kind)
            } else {
                holder.queue_action(ActionId::none());
                AlterationEffect::Stunned
            }
        }
        Alteration::Weak => {
            if may_cure && rng.roll_percent() < Alteration::WEAK_CURE_CHANCE {
                cure(holder, kind)
            } else {
                AlterationEffect::Weakened
            }
        }
    };

    Some(effect)
}

fn cure(holder: &mut Combatant, kind: Alteration) -> AlterationEffect {
    holder.alteration_mut().clear();
    AlterationEffect::Cured(kind)
}

fn confusion(holder: &mut Combatant, formula: &DamageFormula, rng: &mut FightRng) -> AlterationEffect {
    let roll = rng.roll_percent();

    if roll < Alteration::CONFUSION_RANDOM_ACTION_CHANCE {
        if let Some(action) = rng.pick(holder.actions()).cloned() {
            holder.queue_action(action.clone());
            return AlterationEffect::ConfusedAction { action };
        }
        return AlterationEffect::Dazed;
    }

    if roll < Alteration::CONFUSION_RANDOM_ACTION_CHANCE + Alteration::CONFUSION_SELF_HIT_CHANCE {
        let damage = round_damage(formula.by_stat(
            holder.attack(),
            holder.defense(),
            &Alteration::CONFUSION_SELF_HIT,
        ));
        holder.take_damage(damage);
        holder.queue_action(ActionId::none());
        return AlterationEffect::ConfusedSelfHit { damage };
    }

    AlterationEffect::Dazed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClassProfile, PlayerProfile};

    fn holder() -> Combatant {
        let class = ClassProfile {
            name: "knight".into(),
            attack: 100,
            defense: 80,
            speed: 50,
            fight_points: 400,
            breath: 4,
            max_breath: 8,
            breath_regen: 2,
            actions: vec![ActionId::new("simpleAttack"), ActionId::new("quickAttack")],
        };
        PlayerProfile::new(7, "holder", class, 10).into_combatant()
    }

    #[test]
    fn no_alteration_does_nothing() {
        let mut unit = holder();
        let mut rng = FightRng::seeded(1);
        assert_eq!(execute_alteration(&mut unit, &DamageFormula::default(), &mut rng), None);
    }

    #[test]
    fn poison_never_cures_on_first_turn() {
        let formula = DamageFormula::default();
        for seed in 0..500 {
            let mut unit = holder();
            unit.apply_alteration(Alteration::Poisoned);
            let mut rng = FightRng::seeded(seed);

            let effect = execute_alteration(&mut unit, &formula, &mut rng);

            assert_eq!(unit.alteration().turns(), 1);
            assert_eq!(unit.alteration().kind(), Alteration::Poisoned);
            assert!(matches!(effect, Some(AlterationEffect::Poisoned { damage }) if damage > 0));
        }
    }

    #[test]
    fn poison_damage_is_within_fixed_bounds() {
        let mut unit = holder();
        unit.apply_alteration(Alteration::Poisoned);
        let before = unit.fight_points().current;
        let mut rng = FightRng::seeded(2);

        let Some(AlterationEffect::Poisoned { damage }) =
            execute_alteration(&mut unit, &DamageFormula::default(), &mut rng)
        else {
            panic!("expected poison damage");
        };

        assert!((10..=35).contains(&damage));
        assert_eq!(unit.fight_points().current, before - damage);
    }

    #[test]
    fn poison_eventually_cures() {
        let formula = DamageFormula::default();
        let mut unit = holder();
        unit.apply_alteration(Alteration::Poisoned);
        let mut rng = FightRng::seeded(5);

        let mut cured = false;
        for _ in 0..200 {
            if let Some(AlterationEffect::Cured(Alteration::Poisoned)) =
                execute_alteration(&mut unit, &formula, &mut rng)
            {
                cured = true;
                break;
            }
        }
        assert!(cured);
        assert!(!unit.alteration().is_active());
    }

    #[test]
    fn stun_skips_one_turn_then_cures() {
        let formula = DamageFormula::default();
        let mut unit = holder();
        unit.apply_alteration(Alteration::Stunned);
        let mut rng = FightRng::seeded(3);

        assert_eq!(
            execute_alteration(&mut unit, &formula, &mut rng),
            Some(AlterationEffect::Stunned)
        );
        assert_eq!(unit.take_queued_action(), Some(ActionId::none()));

        assert_eq!(
            execute_alteration(&mut unit, &formula, &mut rng),
            Some(AlterationEffect::Cured(Alteration::Stunned))
        );
        assert_eq!(unit.take_queued_action(), None);
    }

    #[test]
    fn confusion_outcomes_are_all_reachable() {
        let formula = DamageFormula::default();
        let (mut replaced, mut self_hit, mut dazed) = (false, false, false);

        for seed in 0..300 {
            let mut unit = holder();
            unit.apply_alteration(Alteration::Confused);
            let mut rng = FightRng::seeded(seed);

            match execute_alteration(&mut unit, &formula, &mut rng) {
                Some(AlterationEffect::ConfusedAction { action }) => {
                    assert!(unit.actions().contains(&action));
                    assert_eq!(unit.take_queued_action(), Some(action));
                    replaced = true;
                }
                Some(AlterationEffect::ConfusedSelfHit { damage }) => {
                    assert!((5..=15).contains(&damage));
                    assert_eq!(unit.take_queued_action(), Some(ActionId::none()));
                    self_hit = true;
                }
                Some(AlterationEffect::Dazed) => dazed = true,
                other => panic!("first confused turn cannot cure: {other:?}"),
            }
        }

        assert!(replaced && self_hit && dazed);
    }

    #[test]
    fn weak_halves_attack_until_cured() {
        let mut unit = holder();
        let base = unit.attack();
        unit.apply_alteration(Alteration::Weak);
        assert_eq!(unit.attack(), base * Alteration::WEAK_ATTACK_FACTOR);

        unit.alteration_mut().clear();
        assert_eq!(unit.attack(), base);
    }

    #[test]
    fn reapplication_is_refused_while_active() {
        let mut unit = holder();
        assert!(unit.apply_alteration(Alteration::Confused));
        assert!(!unit.apply_alteration(Alteration::Poisoned));
        assert_eq!(unit.alteration().kind(), Alteration::Confused);
    }
}
