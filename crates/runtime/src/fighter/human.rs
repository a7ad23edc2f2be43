//! Human-driven fighter.

use std::sync::Arc;
use std::time::Duration;

use fight_core::{ActionId, Combatant, PlayerProfile};
use tracing::warn;

use crate::api::{ActionChooser, ChoiceRequest, FighterHooks, NoopHooks};

/// Fighter whose actions come from an external chooser.
pub struct HumanFighter {
    pub(super) combatant: Combatant,
    chooser: Arc<dyn ActionChooser>,
    pub(super) hooks: Arc<dyn FighterHooks>,
}

impl HumanFighter {
    pub fn new(combatant: Combatant, chooser: Arc<dyn ActionChooser>) -> Self {
        Self {
            combatant,
            chooser,
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Snapshot `profile` into a fresh combatant.
    pub fn from_profile(profile: &PlayerProfile, chooser: Arc<dyn ActionChooser>) -> Self {
        Self::new(profile.to_combatant(), chooser)
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn FighterHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Wait for the chooser, substituting `none` on timeout or give-up.
    pub(super) async fn request_action(&self, turn: u32, timeout: Duration) -> ActionId {
        let request = ChoiceRequest {
            fighter: self.combatant.id(),
            turn,
            actions: self.combatant.actions().to_vec(),
            breath: self.combatant.breath().current,
        };

        match tokio::time::timeout(timeout, self.chooser.choose(request)).await {
            Ok(Some(action)) => action,
            Ok(None) => {
                warn!(
                    target: "fight::fighter",
                    fighter = %self.combatant.id(),
                    turn,
                    "chooser gave up, using default action"
                );
                ActionId::none()
            }
            Err(_) => {
                warn!(
                    target: "fight::fighter",
                    fighter = %self.combatant.id(),
                    turn,
                    timeout_ms = timeout.as_millis() as u64,
                    "choice timed out, using default action"
                );
                ActionId::none()
            }
        }
    }
}
