//! Presentation layer abstraction.
//!
//! The controller notifies a [`DisplaySink`] of every visible state change.
//! A sink owns no combat logic; any error it returns aborts the fight.
use async_trait::async_trait;
use fight_core::{WeatherEvent, WeatherKind};

use super::errors::DisplayError;
use crate::events::{FightResult, FightView, HistoryEntry};

/// External presentation layer of a fight.
///
/// Implementations can render to chat, a terminal, a socket, or record
/// events for tests. Each call may suspend on transport I/O.
#[async_trait]
pub trait DisplaySink: Send + Sync {
    /// Present both fighters before the first turn.
    async fn introduce(&self, view: &FightView) -> Result<(), DisplayError>;

    /// Append an entry to the action history.
    async fn push_history(&self, entry: &HistoryEntry) -> Result<(), DisplayError>;

    /// Redisplay current fight status.
    async fn refresh_status(&self, view: &FightView) -> Result<(), DisplayError>;

    async fn weather_event(
        &self,
        kind: WeatherKind,
        event: &WeatherEvent,
    ) -> Result<(), DisplayError>;

    async fn outcome(&self, result: &FightResult) -> Result<(), DisplayError>;

    /// Tell the audience the fight was aborted.
    async fn bugged(&self, reason: &str) -> Result<(), DisplayError>;
}
