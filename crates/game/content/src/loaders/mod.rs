//! Content loaders for reading fight data from files.
//!
//! Each loader parses one file format into fight-core types. The
//! [`ContentFactory`] ties them together over a data directory, and
//! [`Content::embedded`] builds the same bundle from the compiled-in data.

pub mod actions;
pub mod classes;
pub mod config;
pub mod factory;
pub mod monsters;

pub use actions::ActionLoader;
pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use monsters::MonsterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
