//! Fight configuration loader.

use std::path::Path;

use fight_core::FightConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for fight configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<FightConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<FightConfig> {
        let config: FightConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hard_turn_limit < config.max_turns {
            anyhow::bail!(
                "hard_turn_limit ({}) must not be below max_turns ({})",
                config.hard_turn_limit,
                config.max_turns
            );
        }
        if !(0.0..=1.0).contains(&config.out_of_breath_chance) {
            anyhow::bail!(
                "out_of_breath_chance must be within 0..=1, got {}",
                config.out_of_breath_chance
            );
        }

        Ok(config)
    }

    /// The configuration compiled into the crate.
    pub fn embedded() -> LoadResult<FightConfig> {
        Self::parse(include_str!("../../data/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::OvertimePolicy;
    use std::io::Write;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = ConfigLoader::embedded().expect("embedded config");
        assert_eq!(config, FightConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_turns = 10\novertime = \"escalate_scripted\"\nseed = 7").unwrap();
        writeln!(file, "[rage]\ndamage_per_point = 5.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_turns, 10);
        assert_eq!(config.overtime, OvertimePolicy::EscalateScripted);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rage.damage_per_point, 5.0);
        assert_eq!(config.repeat_penalty.threshold, 3);
    }

    #[test]
    fn inconsistent_limits_are_rejected() {
        let err = ConfigLoader::parse("max_turns = 100\nhard_turn_limit = 50").unwrap_err();
        assert!(err.to_string().contains("hard_turn_limit"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/fight.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fight.toml"));
    }
}
