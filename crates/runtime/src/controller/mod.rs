//! Fight controller: the turn state machine.
//!
//! # States
//!
//! ```text
//! NotStarted ──start_fight──▶ Running ──end condition──▶ Finished
//!                                │
//!                                └──display failure──▶ Bug
//! ```
//!
//! `Bug` is terminal: every fighter lock is released exactly once and no
//! further turn runs. A fight in `Bug` is never resumed.
//!
//! # Turn
//!
//! ```text
//! prepare_next_turn
//!   weather → timeout / end check → overtime escalation
//!   → alteration (no turn consumed) → end check → status
//!   → tick counters → rage bonus (no turn consumed) → obtain action
//! execute_fight_action(action, end_turn = true)
//!   pay breath → resolve → history → end check
//!   → turn += 1, swap roles, regenerate breath
//! ```
//!
//! Each step suspends only on the display sink or on the acting fighter's
//! choice.

mod builder;
mod turn;

pub use builder::FightBuilder;

use std::sync::Arc;

use fight_core::{
    ActionRegistry, Combatant, DamageFormula, FightConfig, FightRng, FightWeather, FighterId,
};

use crate::api::{DisplaySink, FightError, Result};
use crate::events::{FightResult, FightView, FighterStatus};
use crate::fighter::Fighter;

/// Callback invoked once with the result of a finished fight.
pub type CompletionCallback = Box<dyn FnOnce(&FightResult) + Send>;

/// Lifecycle state of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FightState {
    NotStarted,
    Running,
    Finished,
    /// Aborted after a display failure.
    Bug,
}

/// Orchestrates one fight between two fighters.
pub struct FightController {
    fighters: [Fighter; 2],
    acting: usize,
    turn: u32,
    state: FightState,
    weather: FightWeather,
    config: FightConfig,
    registry: Arc<ActionRegistry>,
    formula: DamageFormula,
    rng: FightRng,
    sink: Arc<dyn DisplaySink>,
    released: [bool; 2],
    escalated: [bool; 2],
    on_complete: Option<CompletionCallback>,
    result: Option<FightResult>,
    failure: Option<FightError>,
}

impl FightController {
    pub fn builder() -> FightBuilder {
        FightBuilder::new()
    }

    pub fn state(&self) -> FightState {
        self.state
    }

    /// Current turn, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> &FightConfig {
        &self.config
    }

    pub fn weather(&self) -> &FightWeather {
        &self.weather
    }

    /// Seed of the fight RNG, for replays.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn acting(&self) -> &Fighter {
        &self.fighters[self.acting]
    }

    pub fn defending(&self) -> &Fighter {
        &self.fighters[1 - self.acting]
    }

    pub fn fighter(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.id() == id)
    }

    /// Result of a finished fight.
    pub fn result(&self) -> Option<&FightResult> {
        self.result.as_ref()
    }

    /// Register the completion callback, replacing any previous one.
    pub fn on_complete(&mut self, callback: impl FnOnce(&FightResult) + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Current view for status displays.
    pub fn view(&self) -> FightView {
        FightView {
            turn: self.turn,
            weather: self.weather.kind(),
            acting: self.acting().id(),
            fighters: self.statuses(),
        }
    }

    /// Start (if needed) and play the fight to its end.
    pub async fn run(&mut self) -> Result<FightResult> {
        if self.state == FightState::NotStarted {
            self.start_fight().await?;
        }
        while self.step().await? == FightState::Running {}

        match (&self.result, &self.failure) {
            (Some(result), _) => Ok(result.clone()),
            (None, Some(failure)) => Err(failure.clone()),
            (None, None) => Err(FightError::NotStarted),
        }
    }

    fn statuses(&self) -> [FighterStatus; 2] {
        [
            FighterStatus::of(self.fighters[0].combatant()),
            FighterStatus::of(self.fighters[1].combatant()),
        ]
    }

    /// Release every fighter's external lock, at most once each.
    fn release_locks(&mut self) {
        for (fighter, released) in self.fighters.iter().zip(self.released.iter_mut()) {
            if !std::mem::replace(released, true) {
                fighter.hooks().release_lock(fighter.id());
            }
        }
    }
}

/// Mutable (acting, defending) pair.
fn pair_mut(fighters: &mut [Fighter; 2], acting: usize) -> (&mut Combatant, &mut Combatant) {
    let [first, second] = fighters;
    if acting == 0 {
        (first.combatant_mut(), second.combatant_mut())
    } else {
        (second.combatant_mut(), first.combatant_mut())
    }
}
