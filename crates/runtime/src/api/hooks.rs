//! Per-fighter lifecycle hooks.
//!
//! The external layer persists stat deltas and rewards through these hooks
//! and releases its "busy" lock keyed by the combatant's identity.
use async_trait::async_trait;
use fight_core::{Combatant, FighterId};

use crate::events::FightResult;

/// Lifecycle callbacks of one fighter.
///
/// `on_fight_end` runs exactly once, after the outcome is displayed, and
/// never for an aborted fight. `release_lock` runs exactly once per fight,
/// whatever the termination path.
#[async_trait]
pub trait FighterHooks: Send + Sync {
    async fn on_fight_start(&self, _fighter: &Combatant) {}

    async fn on_fight_end(&self, _fighter: &Combatant, _result: &FightResult) {}

    fn release_lock(&self, _fighter: FighterId) {}
}

/// Hooks that do nothing. Default for scripted fighters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl FighterHooks for NoopHooks {}
