//! Deterministic fight rules shared by the runtime and offline tools.
//!
//! `fight-core` defines the canonical combat rules (stats, modifiers, damage
//! formula, alterations, action catalog, weather, outcome) as pure,
//! synchronous APIs. Every random decision draws from an explicit
//! [`FightRng`], so a seeded fight replays identically. Orchestration,
//! timeouts and display live in `fight-runtime`.
pub mod action;
pub mod alteration;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;
pub mod stats;
pub mod weather;

pub use action::{
    ActionContext, ActionDescriptor, ActionEffect, ActionId, ActionOutcome, ActionRegistry,
    AlterationChance, Buff, Side, StatInput, StatSource, Target, resolve_action,
};
pub use alteration::{Alteration, AlterationEffect, AlterationState, execute_alteration};
pub use combat::{AttackInfo, DamageFormula, HitKind, SecondaryEffect, StatTriple};
pub use config::{
    EscalationConfig, FightConfig, FormulaConfig, OvertimePolicy, RageConfig, RepeatPenaltyConfig,
};
pub use engine::{BreathPayment, FightOutcome, decide_outcome, escalate, first_actor, pay_breath};
pub use error::{ErrorSeverity, RegistryError, ResolveError};
pub use rng::FightRng;
pub use state::{
    ClassProfile, Combatant, FighterId, ItemBonus, MonsterAttack, MonsterProfile, PlayerProfile,
    Role,
};
pub use stats::{CoreStats, ModifierOp, ResourceMeter, StatKind, StatModifier};
pub use weather::{FightWeather, WeatherEvent, WeatherKind};
