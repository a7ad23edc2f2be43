//! Combat resolution: damage formula and secondary effects.
//!
//! # Architecture
//!
//! - **Stats-based**: damage comes from effective stats read off combatants
//! - **Bounded**: a tanh power curve compresses stats, so stacking modifiers
//!   has diminishing returns
//! - **Seeded**: jitter and crit/miss rolls draw from the fight's [`FightRng`]
//!
//! # Core Functions
//!
//! - [`DamageFormula::by_stat`]: interval-interpolated damage for one stat pair
//! - [`DamageFormula::total_damage`]: weighted sum + jitter + multipliers + level bonus
//! - [`DamageFormula::secondary_effects`]: critical / missed / normal
//!
//! [`FightRng`]: crate::FightRng

pub mod formula;
pub mod result;

pub use formula::{AttackInfo, DamageFormula, StatTriple, lerp};
pub use result::{HitKind, SecondaryEffect};
