//! Topic-based event bus implementation.

use async_trait::async_trait;
use fight_core::{WeatherEvent, WeatherKind};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{FightEvent, FightResult, FightView, HistoryEntry};
use crate::api::{DisplayError, DisplaySink};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Action history and weather
    History,
    /// Introductions and status redisplays
    Status,
    /// Outcome and abort notices
    Outcome,
}

impl FightEvent {
    pub fn topic(&self) -> Topic {
        match self {
            FightEvent::History(_) | FightEvent::Weather { .. } => Topic::History,
            FightEvent::Introduced(_) | FightEvent::Status(_) => Topic::Status,
            FightEvent::Outcome(_) | FightEvent::Bugged { .. } => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: a topic without
/// subscribers drops its events.
#[derive(Clone)]
pub struct EventBus {
    history: broadcast::Sender<FightEvent>,
    status: broadcast::Sender<FightEvent>,
    outcome: broadcast::Sender<FightEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: broadcast::channel(capacity).0,
            status: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: FightEvent) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<FightEvent> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<FightEvent>)> {
        topics.iter().map(|&topic| (topic, self.subscribe(topic))).collect()
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<FightEvent> {
        match topic {
            Topic::History => &self.history,
            Topic::Status => &self.status,
            Topic::Outcome => &self.outcome,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// The bus never fails: lagging or missing subscribers only lose events.
#[async_trait]
impl DisplaySink for EventBus {
    async fn introduce(&self, view: &FightView) -> Result<(), DisplayError> {
        self.publish(FightEvent::Introduced(view.clone()));
        Ok(())
    }

    async fn push_history(&self, entry: &HistoryEntry) -> Result<(), DisplayError> {
        self.publish(FightEvent::History(entry.clone()));
        Ok(())
    }

    async fn refresh_status(&self, view: &FightView) -> Result<(), DisplayError> {
        self.publish(FightEvent::Status(view.clone()));
        Ok(())
    }

    async fn weather_event(&self, kind: WeatherKind, event: &WeatherEvent) -> Result<(), DisplayError> {
        self.publish(FightEvent::Weather { kind, event: *event });
        Ok(())
    }

    async fn outcome(&self, result: &FightResult) -> Result<(), DisplayError> {
        self.publish(FightEvent::Outcome(result.clone()));
        Ok(())
    }

    async fn bugged(&self, reason: &str) -> Result<(), DisplayError> {
        self.publish(FightEvent::Bugged {
            reason: reason.to_owned(),
        });
        Ok(())
    }
}
