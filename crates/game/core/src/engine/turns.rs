//! Initiative and breath payment.

use crate::rng::FightRng;
use crate::state::Combatant;

/// Index (0 or 1) of the combatant acting first.
///
/// Strictly higher effective speed wins; an exact tie is a fair coin flip.
pub fn first_actor(a: &Combatant, b: &Combatant, rng: &mut FightRng) -> usize {
    let (speed_a, speed_b) = (a.speed(), b.speed());
    if speed_a > speed_b {
        0
    } else if speed_b > speed_a {
        1
    } else if rng.coin_flip() {
        0
    } else {
        1
    }
}

/// How an action's breath cost was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BreathPayment {
    /// Cost paid in full.
    Paid,
    /// Not enough breath: the action is replaced by the out-of-breath action.
    Downgraded,
    /// Not enough breath: breath drops to zero and the action runs anyway.
    Forced,
}

/// Charge `cost` breath to `fighter`.
///
/// When breath is short, `downgrade_chance` (0..=1) decides between a
/// downgrade, which leaves breath untouched, and a forced payment.
pub fn pay_breath(
    fighter: &mut Combatant,
    cost: u32,
    downgrade_chance: f64,
    rng: &mut FightRng,
) -> BreathPayment {
    if fighter.spend_breath(cost) {
        return BreathPayment::Paid;
    }
    if rng.chance(downgrade_chance) {
        BreathPayment::Downgraded
    } else {
        fighter.drain_breath();
        BreathPayment::Forced
    }
}
