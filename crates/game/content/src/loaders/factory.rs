//! Content factory for building the fight content bundle from data files.

use std::path::PathBuf;
use std::sync::Arc;

use fight_core::{ActionRegistry, ClassProfile, FightConfig, MonsterProfile};

use crate::loaders::{ActionLoader, ClassLoader, ConfigLoader, LoadResult, MonsterLoader};

/// Everything a fight needs from content, validated as a whole.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: FightConfig,
    pub registry: Arc<ActionRegistry>,
    pub classes: Vec<ClassProfile>,
    pub monsters: Vec<MonsterProfile>,
}

impl Content {
    /// Content compiled into the crate.
    pub fn embedded() -> LoadResult<Self> {
        Self::assemble(
            ConfigLoader::embedded()?,
            ActionLoader::embedded()?,
            ClassLoader::embedded()?,
            MonsterLoader::embedded()?,
        )
    }

    pub fn class(&self, name: &str) -> Option<&ClassProfile> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn monster(&self, key: &str) -> Option<&MonsterProfile> {
        self.monsters.iter().find(|m| m.key == key)
    }

    /// Check that every class and monster only references known actions.
    fn assemble(
        config: FightConfig,
        registry: ActionRegistry,
        classes: Vec<ClassProfile>,
        monsters: Vec<MonsterProfile>,
    ) -> LoadResult<Self> {
        for class in &classes {
            if let Some(unknown) = class.actions.iter().find(|a| !registry.contains(a)) {
                anyhow::bail!("class '{}' uses unknown action '{}'", class.name, unknown);
            }
        }
        for monster in &monsters {
            if let Some(unknown) = monster.attacks.iter().find(|a| !registry.contains(&a.action)) {
                anyhow::bail!("monster '{}' uses unknown action '{}'", monster.key, unknown.action);
            }
        }

        Ok(Self {
            config,
            registry: Arc::new(registry),
            classes,
            monsters,
        })
    }
}

/// Content factory that loads fight content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// ├── classes.ron
/// └── monsters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load fight configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<FightConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load and validate the action registry from `actions.ron`.
    pub fn load_registry(&self) -> LoadResult<ActionRegistry> {
        ActionLoader::load_registry(&self.data_dir.join("actions.ron"))
    }

    /// Load player classes from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassProfile>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterProfile>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load and cross-check the whole bundle.
    pub fn load(&self) -> LoadResult<Content> {
        Content::assemble(
            self.load_config()?,
            self.load_registry()?,
            self.load_classes()?,
            self.load_monsters()?,
        )
    }
}
