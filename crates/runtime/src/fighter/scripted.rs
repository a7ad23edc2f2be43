//! Scripted (monster) fighter.

use std::sync::Arc;
use std::time::Duration;

use fight_core::{ActionId, ActionRegistry, Combatant, FightRng, FighterId, MonsterAttack, MonsterProfile};
use tracing::debug;

use crate::api::{FighterHooks, NoopHooks};

/// Fighter that picks its own actions.
pub struct ScriptedFighter {
    pub(super) combatant: Combatant,
    attacks: Vec<MonsterAttack>,
    pub(super) hooks: Arc<dyn FighterHooks>,
}

impl ScriptedFighter {
    pub fn new(combatant: Combatant, attacks: Vec<MonsterAttack>) -> Self {
        Self {
            combatant,
            attacks,
            hooks: Arc::new(NoopHooks),
        }
    }

    /// Instantiate a monster template under `id`.
    pub fn from_profile(profile: &MonsterProfile, id: impl Into<FighterId>) -> Self {
        Self::new(profile.to_combatant(id), profile.attacks.clone())
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn FighterHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Attacks the combatant's level allows.
    pub fn eligible_attacks(&self) -> impl Iterator<Item = &MonsterAttack> {
        let level = self.combatant.level;
        self.attacks.iter().filter(move |a| a.min_level <= level)
    }

    /// Think for `delay`, then pick an eligible attack by weight.
    ///
    /// Attacks without an explicit weight use the action's AI weight. When
    /// nothing can be picked the fighter does nothing.
    pub(super) async fn request_action(
        &self,
        registry: &ActionRegistry,
        rng: &mut FightRng,
        delay: Duration,
    ) -> ActionId {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.pick(registry, rng)
    }

    fn pick(&self, registry: &ActionRegistry, rng: &mut FightRng) -> ActionId {
        let eligible: Vec<&MonsterAttack> = self.eligible_attacks().collect();
        let weights: Vec<u32> = eligible
            .iter()
            .map(|attack| {
                attack
                    .weight
                    .unwrap_or_else(|| registry.resolve(&attack.action).0.ai_weight)
            })
            .collect();

        match rng.weighted_pick(&weights).and_then(|index| eligible.get(index)) {
            Some(attack) => attack.action.clone(),
            None => {
                debug!(
                    target: "fight::fighter",
                    fighter = %self.combatant.id(),
                    "no eligible attack, doing nothing"
                );
                ActionId::none()
            }
        }
    }
}
