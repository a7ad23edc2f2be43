//! Fight event payloads.

use fight_core::{
    ActionId, ActionOutcome, Alteration, AlterationEffect, BreathPayment, Combatant, FightOutcome,
    FighterId, ResourceMeter, Role, WeatherEvent, WeatherKind,
};
use serde::{Deserialize, Serialize};

/// Visible state of one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterStatus {
    pub id: FighterId,
    pub name: String,
    pub level: u32,
    pub fight_points: ResourceMeter,
    pub breath: ResourceMeter,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub alteration: Alteration,
    pub role: Role,
}

impl FighterStatus {
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id(),
            name: combatant.name().to_owned(),
            level: combatant.level,
            fight_points: *combatant.fight_points(),
            breath: *combatant.breath(),
            attack: combatant.attack(),
            defense: combatant.defense(),
            speed: combatant.speed(),
            alteration: combatant.alteration().kind(),
            role: combatant.role(),
        }
    }
}

/// Snapshot of the whole fight for status displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightView {
    pub turn: u32,
    pub weather: WeatherKind,
    pub acting: FighterId,
    pub fighters: [FighterStatus; 2],
}

/// One line of the fight's action history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: u32,
    pub fighter: FighterId,
    pub kind: HistoryKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryKind {
    /// An action was executed.
    Action {
        /// Id the fighter asked for, before fallback or downgrade.
        requested: ActionId,
        breath: BreathPayment,
        /// Whether the requested id was unknown and replaced by `none`.
        fallback: bool,
        /// Whether the action was auto-executed without ending the turn.
        bonus: bool,
        outcome: ActionOutcome,
    },
    /// The fighter's alteration acted at the start of its turn.
    Alteration { effect: AlterationEffect },
    /// The scripted side was escalated for overtime.
    Escalated,
}

/// Final result of a finished fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    pub outcome: FightOutcome,
    /// Turns played, counting the turn the fight ended in when it ended
    /// mid-turn.
    pub turns: u32,
    pub friendly: bool,
    pub fighters: [FighterStatus; 2],
}

impl FightResult {
    pub fn winner(&self) -> Option<FighterId> {
        self.outcome.winner()
    }

    pub fn loser(&self) -> Option<FighterId> {
        match self.outcome {
            FightOutcome::Victory { loser, .. } => Some(loser),
            FightOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome.is_draw()
    }

    pub fn fighter(&self, id: FighterId) -> Option<&FighterStatus> {
        self.fighters.iter().find(|f| f.id == id)
    }
}

/// Every change a display sink is told about, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FightEvent {
    Introduced(FightView),
    History(HistoryEntry),
    Status(FightView),
    Weather { kind: WeatherKind, event: WeatherEvent },
    Outcome(FightResult),
    Bugged { reason: String },
}
