//! Builder for [`FightController`].

use std::sync::Arc;

use fight_content::Content;
use fight_core::{ActionRegistry, DamageFormula, FightConfig, FightRng, FightWeather, WeatherKind};

use crate::api::{DisplaySink, FightError, Result};
use crate::events::{EventBus, FightResult};
use crate::fighter::Fighter;

use super::{CompletionCallback, FightController, FightState};

/// Weather selection at build time.
enum WeatherChoice {
    Fixed(WeatherKind),
    Random,
}

/// Assembles a [`FightController`].
///
/// Fighters and an action registry are required. Without a sink, events go
/// to an [`EventBus`] nobody listens to. Without an explicit RNG the fight is
/// seeded from [`FightConfig::seed`], or from entropy.
pub struct FightBuilder {
    fighters: Option<[Fighter; 2]>,
    config: FightConfig,
    registry: Option<Arc<ActionRegistry>>,
    sink: Option<Arc<dyn DisplaySink>>,
    weather: WeatherChoice,
    rng: Option<FightRng>,
    on_complete: Option<CompletionCallback>,
}

impl FightBuilder {
    pub fn new() -> Self {
        Self {
            fighters: None,
            config: FightConfig::default(),
            registry: None,
            sink: None,
            weather: WeatherChoice::Fixed(WeatherKind::Clear),
            rng: None,
            on_complete: None,
        }
    }

    pub fn fighters(mut self, first: impl Into<Fighter>, second: impl Into<Fighter>) -> Self {
        self.fighters = Some([first.into(), second.into()]);
        self
    }

    pub fn config(mut self, config: FightConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Arc<ActionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Take configuration and registry from loaded content.
    pub fn content(self, content: &Content) -> Self {
        self.config(content.config.clone())
            .registry(Arc::clone(&content.registry))
    }

    pub fn sink(mut self, sink: Arc<dyn DisplaySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn weather(mut self, kind: WeatherKind) -> Self {
        self.weather = WeatherChoice::Fixed(kind);
        self
    }

    /// Draw the weather from the fight RNG.
    pub fn random_weather(mut self) -> Self {
        self.weather = WeatherChoice::Random;
        self
    }

    pub fn rng(mut self, rng: FightRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn seed(self, seed: u64) -> Self {
        self.rng(FightRng::seeded(seed))
    }

    pub fn on_complete(mut self, callback: impl FnOnce(&FightResult) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<FightController> {
        let fighters = self.fighters.ok_or(FightError::Incomplete("fighters"))?;
        let registry = self.registry.ok_or(FightError::Incomplete("action registry"))?;

        let mut rng = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => FightRng::seeded(seed),
            (None, None) => FightRng::from_entropy(),
        };
        let weather = match self.weather {
            WeatherChoice::Fixed(kind) => FightWeather::new(kind),
            WeatherChoice::Random => FightWeather::random(&mut rng),
        };
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(EventBus::new()) as Arc<dyn DisplaySink>);

        Ok(FightController {
            fighters,
            acting: 0,
            turn: 1,
            state: FightState::NotStarted,
            weather,
            formula: DamageFormula::new(self.config.formula.clone()),
            config: self.config,
            registry,
            rng,
            sink,
            released: [false; 2],
            escalated: [false; 2],
            on_complete: self.on_complete,
            result: None,
            failure: None,
        })
    }
}

impl Default for FightBuilder {
    fn default() -> Self {
        Self::new()
    }
}
