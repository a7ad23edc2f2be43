//! In-memory sink that records every event.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use fight_core::{WeatherEvent, WeatherKind};

use super::types::{FightEvent, FightResult, FightView, HistoryEntry};
use crate::api::{DisplayError, DisplaySink};

/// Display sink that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FightEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> Vec<FightEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// History entries recorded so far.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FightEvent::History(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: FightEvent) -> Result<(), DisplayError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

#[async_trait]
impl DisplaySink for RecordingSink {
    async fn introduce(&self, view: &FightView) -> Result<(), DisplayError> {
        self.record(FightEvent::Introduced(view.clone()))
    }

    async fn push_history(&self, entry: &HistoryEntry) -> Result<(), DisplayError> {
        self.record(FightEvent::History(entry.clone()))
    }

    async fn refresh_status(&self, view: &FightView) -> Result<(), DisplayError> {
        self.record(FightEvent::Status(view.clone()))
    }

    async fn weather_event(&self, kind: WeatherKind, event: &WeatherEvent) -> Result<(), DisplayError> {
        self.record(FightEvent::Weather { kind, event: *event })
    }

    async fn outcome(&self, result: &FightResult) -> Result<(), DisplayError> {
        self.record(FightEvent::Outcome(result.clone()))
    }

    async fn bugged(&self, reason: &str) -> Result<(), DisplayError> {
        self.record(FightEvent::Bugged {
            reason: reason.to_owned(),
        })
    }
}
