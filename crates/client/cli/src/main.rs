//! Terminal client entry point.
mod args;
mod display;
mod input;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use fight_content::{Content, ContentFactory};
use fight_core::{ActionId, PlayerProfile};
use fight_runtime::{
    ActionChooser, FightController, HumanFighter, ScriptedChooser, ScriptedFighter,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use args::Args;
use display::TerminalSink;
use input::StdinChooser;

const PLAYER_ID: u64 = 1;
const MONSTER_ID: u64 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::load();
    setup_logging();

    let mut content = match &args.data_dir {
        Some(dir) => ContentFactory::new(dir).load()?,
        None => Content::embedded()?,
    };
    if let Some(seed) = args.seed {
        content.config = content.config.with_seed(seed);
    }
    if let Some(max_turns) = args.max_turns {
        content.config = content.config.with_max_turns(max_turns);
    }

    let class = content
        .class(&args.class)
        .cloned()
        .ok_or_else(|| anyhow!("unknown class: {}", args.class))?;
    let monster = content
        .monster(&args.monster)
        .ok_or_else(|| anyhow!("unknown monster: {}", args.monster))?;

    let chooser: Arc<dyn ActionChooser> = match &args.script {
        Some(script) => Arc::new(ScriptedChooser::new(
            script.iter().map(|id| ActionId::new(id.as_str())),
        )),
        None => Arc::new(StdinChooser::new()),
    };
    let player = PlayerProfile::new(PLAYER_ID, "player", class, args.level).with_rage(args.rage);
    let player = HumanFighter::from_profile(&player, chooser);
    let monster = ScriptedFighter::from_profile(monster, MONSTER_ID);

    let mut builder = FightController::builder()
        .content(&content)
        .fighters(player, monster)
        .sink(Arc::new(TerminalSink::new(args.json)));
    builder = match args.weather.kind() {
        Some(kind) => builder.weather(kind),
        None => builder.random_weather(),
    };

    let mut fight = builder.build()?;
    tracing::info!(seed = fight.seed(), "replay with --seed {}", fight.seed());

    fight.run().await.context("fight did not finish")?;
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
