//! Stat system for combatants.
//!
//! # Architecture
//!
//! ```text
//! [ Core Stats ]          attack / defense / speed, snapshotted at fight start
//!      ↓
//! [ Modifier Pipeline ]   ordered ADD / MULTIPLY list per stat
//!      ↓
//! [ Effective Stats ]     read by the damage formula
//!
//! [ Resources ]           fight points, breath (current / max)
//! [ Damage Multipliers ]  decaying, independent of stat modifiers
//! ```
//!
//! Modifiers are folded strictly in insertion order: interleaving ADD and
//! MULTIPLY is order-sensitive on purpose.

pub mod core;
pub mod modifiers;
pub mod multiplier;
pub mod resources;

pub use self::core::{CoreStats, StatKind};
pub use modifiers::{ModifierOp, ModifierPipeline, StatModifier};
pub use multiplier::{DamageMultiplier, DamageMultipliers};
pub use resources::ResourceMeter;
