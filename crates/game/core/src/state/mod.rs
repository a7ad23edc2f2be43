//! Combatant state and the persistent profiles it is built from.
//!
//! Profiles ([`PlayerProfile`], [`MonsterProfile`]) are snapshots of
//! persistent data taken at fight start. A [`Combatant`] is built once from a
//! profile, mutated only during the fight, and discarded afterwards.

pub mod combatant;
pub mod common;
pub mod profile;

pub use combatant::{Combatant, Role};
pub use common::FighterId;
pub use profile::{ClassProfile, ItemBonus, MonsterAttack, MonsterProfile, PlayerProfile};
