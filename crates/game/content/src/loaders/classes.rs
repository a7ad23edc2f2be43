//! Player class loader.

use std::path::Path;

use fight_core::ClassProfile;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassProfile>,
}

/// Loader for player classes from RON files.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ClassProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ClassProfile>> {
        let catalog: ClassCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        Ok(catalog.classes)
    }

    pub fn embedded() -> LoadResult<Vec<ClassProfile>> {
        Self::parse(include_str!("../../data/classes.ron"))
    }
}
