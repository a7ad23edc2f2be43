//! Action catalog loader.

use std::path::Path;

use fight_core::{ActionDescriptor, ActionRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCatalog {
    pub actions: Vec<ActionDescriptor>,
}

/// Loader for the action catalog from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Load action descriptors from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ActionDescriptor>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse action descriptors from a RON string.
    pub fn parse(content: &str) -> LoadResult<Vec<ActionDescriptor>> {
        let catalog: ActionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        Ok(catalog.actions)
    }

    /// Load and validate a registry from a RON file.
    pub fn load_registry(path: &Path) -> LoadResult<ActionRegistry> {
        Self::build(Self::load(path)?)
    }

    /// The validated registry built from the compiled-in catalog.
    pub fn embedded() -> LoadResult<ActionRegistry> {
        Self::build(Self::parse(include_str!("../../data/actions.ron"))?)
    }

    fn build(actions: Vec<ActionDescriptor>) -> LoadResult<ActionRegistry> {
        ActionRegistry::new(actions)
            .map_err(|e| anyhow::anyhow!("Invalid action catalog: {}", e))
    }
}
