//! Data-driven fight content and loaders.
//!
//! This crate houses the static content of the fight engine and provides
//! loaders for RON/TOML data files:
//! - Action catalog (RON)
//! - Player classes (RON)
//! - Monster templates (RON)
//! - Engine configuration (TOML)
//!
//! The default content is embedded at compile time; every loader also reads
//! from a path so deployments can ship their own data directory.
//!
//! All loaders use fight-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ClassLoader, ConfigLoader, Content, ContentFactory, LoadResult, MonsterLoader,
};
