//! Command line and environment configuration.
use std::env;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fight_core::WeatherKind;

/// Run a single fight between a player class and a monster.
#[derive(Debug, Parser)]
#[command(name = "fight-cli", version)]
pub struct Args {
    /// Player class name.
    #[arg(long, default_value = "knight")]
    pub class: String,

    /// Player level.
    #[arg(long, default_value_t = 10)]
    pub level: u32,

    /// Banked rage points spent on the first turns.
    #[arg(long, default_value_t = 0)]
    pub rage: u32,

    /// Monster template key.
    #[arg(long, default_value = "wolf")]
    pub monster: String,

    /// Play the given comma-separated actions instead of prompting.
    #[arg(long, value_delimiter = ',')]
    pub script: Option<Vec<String>>,

    /// Fight RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Content directory (actions.ron, classes.ron, monsters.ron, config.toml).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the configured maximum number of turns.
    #[arg(long)]
    pub max_turns: Option<u32>,

    #[arg(long, value_enum, default_value_t = WeatherArg::Clear)]
    pub weather: WeatherArg,

    /// Print events as JSON lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WeatherArg {
    Clear,
    Rain,
    Fog,
    Storm,
    Random,
}

impl WeatherArg {
    /// Fixed weather, or `None` for a random draw.
    pub fn kind(self) -> Option<WeatherKind> {
        match self {
            WeatherArg::Clear => Some(WeatherKind::Clear),
            WeatherArg::Rain => Some(WeatherKind::Rain),
            WeatherArg::Fog => Some(WeatherKind::Fog),
            WeatherArg::Storm => Some(WeatherKind::Storm),
            WeatherArg::Random => None,
        }
    }
}

impl Args {
    /// Parse the command line, filling unset options from the environment.
    ///
    /// Environment variables:
    /// - `FIGHT_DATA_DIR` - Content directory (default: embedded content)
    /// - `FIGHT_SEED` - Fight RNG seed (default: entropy)
    pub fn load() -> Self {
        let mut args = Self::parse();
        if args.data_dir.is_none() {
            args.data_dir = env::var_os("FIGHT_DATA_DIR").map(PathBuf::from);
        }
        if args.seed.is_none() {
            args.seed = read_env("FIGHT_SEED");
        }
        args
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
