//! Combatant: the in-fight state of one side.
//!
//! A combatant is built from a profile snapshot and owns everything the rules
//! mutate during a fight: resources, modifiers, alteration, action history.
//!
//! # Invariants
//!
//! - Fight points and breath never go below zero (meters clamp).
//! - At most one alteration is carried; a new one is refused while active.
//! - Effective stats are the base stats folded through the modifier pipeline.

use crate::action::ActionId;
use crate::alteration::{Alteration, AlterationState};
use crate::stats::{
    CoreStats, DamageMultipliers, ModifierPipeline, ResourceMeter, StatKind, StatModifier,
};

use super::FighterId;

/// Position of a combatant in the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    #[default]
    NotStarted,
    Acting,
    Defending,
}

/// In-fight state of a single combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: FighterId,
    name: String,
    pub level: u32,

    // === Stats ===
    base: CoreStats,
    fight_points: ResourceMeter,
    breath: ResourceMeter,
    breath_regen: u32,
    modifiers: ModifierPipeline,
    damage_multipliers: DamageMultipliers,

    // === Status ===
    alteration: AlterationState,
    role: Role,

    // === Actions ===
    actions: Vec<ActionId>,
    history: Vec<ActionId>,
    queued: Option<ActionId>,
    rage: u32,
    turns_played: u32,
}

impl Combatant {
    pub fn new(
        id: impl Into<FighterId>,
        name: impl Into<String>,
        level: u32,
        base: CoreStats,
        fight_points: ResourceMeter,
        breath: ResourceMeter,
        breath_regen: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            base,
            fight_points,
            breath,
            breath_regen,
            modifiers: ModifierPipeline::new(),
            damage_multipliers: DamageMultipliers::new(),
            alteration: AlterationState::default(),
            role: Role::NotStarted,
            actions: Vec::new(),
            history: Vec::new(),
            queued: None,
            rage: 0,
            turns_played: 0,
        }
    }

    pub fn with_actions(mut self, actions: Vec<ActionId>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_rage(mut self, rage: u32) -> Self {
        self.rage = rage;
        self
    }

    pub fn id(&self) -> FighterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_stats(&self) -> &CoreStats {
        &self.base
    }

    // ========================================================================
    // Effective stats
    // ========================================================================

    /// Effective value of a stat.
    ///
    /// Weakness halves attack after the modifier pipeline has been folded.
    pub fn stat(&self, stat: StatKind) -> f64 {
        let value = self.modifiers.resolve(stat, f64::from(self.base.get(stat)));
        match (stat, self.alteration.kind()) {
            (StatKind::Attack, Alteration::Weak) => value * Alteration::WEAK_ATTACK_FACTOR,
            _ => value,
        }
    }

    pub fn attack(&self) -> f64 {
        self.stat(StatKind::Attack)
    }

    pub fn defense(&self) -> f64 {
        self.stat(StatKind::Defense)
    }

    pub fn speed(&self) -> f64 {
        self.stat(StatKind::Speed)
    }

    pub fn modifiers(&self) -> &ModifierPipeline {
        &self.modifiers
    }

    pub fn apply_modifier(&mut self, stat: StatKind, modifier: StatModifier) {
        self.modifiers.apply(stat, modifier);
    }

    /// Remove every modifier produced by `origin`. Returns the removed count.
    pub fn clear_modifiers_from(&mut self, origin: &ActionId) -> usize {
        self.modifiers.remove_by_origin(origin)
    }

    /// Product of the active damage multipliers.
    pub fn damage_multiplier(&self) -> f64 {
        self.damage_multipliers.product()
    }

    pub fn push_damage_multiplier(&mut self, value: f64, turns: u32) {
        self.damage_multipliers.push(value, turns);
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn fight_points(&self) -> &ResourceMeter {
        &self.fight_points
    }

    pub fn breath(&self) -> &ResourceMeter {
        &self.breath
    }

    pub fn breath_regen(&self) -> u32 {
        self.breath_regen
    }

    /// Returns the fight points actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.fight_points.deplete(amount)
    }

    /// Returns the fight points actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.fight_points.restore(amount)
    }

    /// Spend `cost` breath. Returns false, leaving breath untouched, when
    /// not enough is available.
    pub fn spend_breath(&mut self, cost: u32) -> bool {
        self.breath.try_spend(cost)
    }

    pub fn drain_breath(&mut self) {
        self.breath.drain();
    }

    pub fn restore_breath(&mut self, amount: u32) -> u32 {
        self.breath.restore(amount)
    }

    /// Regenerate breath at the start of this combatant's turn.
    ///
    /// Full regeneration on the first two turns played, half (rounded up)
    /// afterwards. Returns the breath actually restored.
    pub fn regenerate_breath(&mut self) -> u32 {
        let amount = if self.turns_played < 2 {
            self.breath_regen
        } else {
            self.breath_regen.div_ceil(2)
        };
        self.breath.restore(amount)
    }

    pub fn is_dead(&self) -> bool {
        self.fight_points.is_empty()
    }

    // ========================================================================
    // Alteration
    // ========================================================================

    pub fn alteration(&self) -> &AlterationState {
        &self.alteration
    }

    pub fn alteration_mut(&mut self) -> &mut AlterationState {
        &mut self.alteration
    }

    /// Apply an alteration if none is active. Returns whether it was applied.
    pub fn apply_alteration(&mut self, kind: Alteration) -> bool {
        if kind.is_none() || self.alteration.is_active() {
            return false;
        }
        self.alteration.set(kind);
        true
    }

    pub fn clear_alteration(&mut self) {
        self.alteration.clear();
    }

    // ========================================================================
    // Actions and turn bookkeeping
    // ========================================================================

    /// Actions this combatant may choose from.
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    /// Actions used so far, oldest first.
    pub fn history(&self) -> &[ActionId] {
        &self.history
    }

    pub fn record_action(&mut self, action: ActionId) {
        self.history.push(action);
    }

    /// Number of immediately preceding uses of `action`, newest first.
    pub fn consecutive_uses(&self, action: &ActionId) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|used| *used == action)
            .count()
    }

    /// Queue the action to play on this combatant's next choice.
    ///
    /// A later queue replaces an earlier one.
    pub fn queue_action(&mut self, action: ActionId) {
        self.queued = Some(action);
    }

    pub fn take_queued_action(&mut self) -> Option<ActionId> {
        self.queued.take()
    }

    pub fn has_queued_action(&self) -> bool {
        self.queued.is_some()
    }

    pub fn rage(&self) -> u32 {
        self.rage
    }

    /// Consume the banked rage.
    pub fn take_rage(&mut self) -> u32 {
        std::mem::take(&mut self.rage)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Turns this combatant has finished as the acting side.
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Count a finished turn of this combatant.
    pub fn end_turn(&mut self) {
        self.turns_played += 1;
    }

    /// Decrement per-turn counters. Expired damage multipliers are dropped.
    pub fn tick_counters(&mut self) {
        self.damage_multipliers.tick();
    }
}
