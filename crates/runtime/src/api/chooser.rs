//! Asynchronous abstraction for sourcing a human-driven fighter's choice.
use async_trait::async_trait;
use fight_core::{ActionId, FighterId};
use tokio::sync::{Mutex, mpsc};

/// What the acting human-driven fighter is asked to choose from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub fighter: FighterId,
    pub turn: u32,
    pub actions: Vec<ActionId>,
    pub breath: u32,
}

/// Source of a human-driven fighter's actions.
///
/// The controller bounds every call with the configured choice timeout, so
/// implementations may wait indefinitely. Returning `None` gives up the
/// choice; the default action is used instead.
#[async_trait]
pub trait ActionChooser: Send + Sync {
    async fn choose(&self, request: ChoiceRequest) -> Option<ActionId>;
}

/// Chooser fed through an mpsc channel.
///
/// The sender half is handed to whatever collects input (reactions, a
/// terminal prompt, a network client).
pub struct ChannelChooser {
    rx: Mutex<mpsc::Receiver<ActionId>>,
}

impl ChannelChooser {
    pub fn new(buffer: usize) -> (Self, mpsc::Sender<ActionId>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { rx: Mutex::new(rx) }, tx)
    }
}

#[async_trait]
impl ActionChooser for ChannelChooser {
    async fn choose(&self, _request: ChoiceRequest) -> Option<ActionId> {
        self.rx.lock().await.recv().await
    }
}

/// Chooser that replays a fixed script, then gives up.
///
/// Useful for testing or unattended demo fights.
pub struct ScriptedChooser {
    script: Mutex<std::collections::VecDeque<ActionId>>,
}

impl ScriptedChooser {
    pub fn new(script: impl IntoIterator<Item = ActionId>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionChooser for ScriptedChooser {
    async fn choose(&self, _request: ChoiceRequest) -> Option<ActionId> {
        self.script.lock().await.pop_front()
    }
}
