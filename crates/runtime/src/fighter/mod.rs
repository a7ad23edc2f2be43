//! Fighter variants.
//!
//! A fighter pairs a [`Combatant`] with the way it picks actions. The set of
//! variants is closed:
//!
//! - [`HumanFighter`]: asks an [`ActionChooser`](crate::ActionChooser), bounded by
//!   the choice timeout, falling back to the `none` action
//! - [`ScriptedFighter`]: weighted-random pick over its level-eligible attacks
//!   after a short thinking delay
//!
//! Both share the same capability surface through [`Fighter`].

mod human;
mod scripted;

pub use human::HumanFighter;
pub use scripted::ScriptedFighter;

use std::sync::Arc;
use std::time::Duration;

use fight_core::{ActionId, ActionRegistry, Combatant, FightRng, FighterId};

use crate::api::FighterHooks;

/// A combatant with its action source.
pub enum Fighter {
    Human(HumanFighter),
    Scripted(ScriptedFighter),
}

impl Fighter {
    pub fn combatant(&self) -> &Combatant {
        match self {
            Fighter::Human(f) => &f.combatant,
            Fighter::Scripted(f) => &f.combatant,
        }
    }

    pub fn combatant_mut(&mut self) -> &mut Combatant {
        match self {
            Fighter::Human(f) => &mut f.combatant,
            Fighter::Scripted(f) => &mut f.combatant,
        }
    }

    pub fn hooks(&self) -> &Arc<dyn FighterHooks> {
        match self {
            Fighter::Human(f) => &f.hooks,
            Fighter::Scripted(f) => &f.hooks,
        }
    }

    pub fn id(&self) -> FighterId {
        self.combatant().id()
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Fighter::Human(_))
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self, Fighter::Scripted(_))
    }

    /// Obtain this turn's action.
    ///
    /// Suspends at most for `timeout` (human) or `thinking` (scripted).
    pub async fn request_action(
        &self,
        turn: u32,
        registry: &ActionRegistry,
        rng: &mut FightRng,
        timeout: Duration,
        thinking: Duration,
    ) -> ActionId {
        match self {
            Fighter::Human(f) => f.request_action(turn, timeout).await,
            Fighter::Scripted(f) => f.request_action(registry, rng, thinking).await,
        }
    }
}

impl From<HumanFighter> for Fighter {
    fn from(fighter: HumanFighter) -> Self {
        Fighter::Human(fighter)
    }
}

impl From<ScriptedFighter> for Fighter {
    fn from(fighter: ScriptedFighter) -> Self {
        Fighter::Scripted(fighter)
    }
}
