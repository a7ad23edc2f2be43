//! End-of-fight detection.

use crate::state::{Combatant, FighterId};

/// Final result of a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FightOutcome {
    Victory { winner: FighterId, loser: FighterId },
    Draw,
}

impl FightOutcome {
    pub fn winner(&self) -> Option<FighterId> {
        match self {
            FightOutcome::Victory { winner, .. } => Some(*winner),
            FightOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, FightOutcome::Draw)
    }
}

/// Decide whether the fight is over.
///
/// Both down at once is a draw, one down is a victory for the other, and a
/// timeout with both standing is a draw. `None` while the fight goes on.
pub fn decide_outcome(a: &Combatant, b: &Combatant, timed_out: bool) -> Option<FightOutcome> {
    match (a.is_dead(), b.is_dead()) {
        (true, true) => Some(FightOutcome::Draw),
        (true, false) => Some(FightOutcome::Victory {
            winner: b.id(),
            loser: a.id(),
        }),
        (false, true) => Some(FightOutcome::Victory {
            winner: a.id(),
            loser: b.id(),
        }),
        (false, false) if timed_out => Some(FightOutcome::Draw),
        (false, false) => None,
    }
}
