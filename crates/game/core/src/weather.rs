//! Fight weather.
//!
//! One weather instance is shared by both combatants and lives as long as the
//! fight. It is applied once per turn, before the acting combatant's action.
//!
//! | Kind    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `Clear` | nothing                                                  |
//! | `Rain`  | once, on first application: speed ×0.85 for both         |
//! | `Fog`   | once, on first application: attack ×0.9 for both         |
//! | `Storm` | every turn: fixed chip damage to the acting combatant    |

use crate::rng::FightRng;
use crate::state::Combatant;
use crate::stats::{StatKind, StatModifier};

/// Weather kinds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Fog,
    Storm,
}

/// Something the weather did this turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherEvent {
    /// A stat of both combatants was multiplied by `factor`.
    Slowed { stat: StatKind, factor: f64 },
    /// The acting combatant lost `damage` fight points.
    Chip { damage: u32 },
}

/// Weather of one fight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightWeather {
    kind: WeatherKind,
    applied: bool,
}

impl FightWeather {
    pub const RAIN_SPEED_FACTOR: f64 = 0.85;
    pub const FOG_ATTACK_FACTOR: f64 = 0.9;
    pub const STORM_DAMAGE: u32 = 4;

    pub fn new(kind: WeatherKind) -> Self {
        Self {
            kind,
            applied: false,
        }
    }

    /// Uniformly random weather.
    pub fn random(rng: &mut FightRng) -> Self {
        const KINDS: [WeatherKind; 4] = [
            WeatherKind::Clear,
            WeatherKind::Rain,
            WeatherKind::Fog,
            WeatherKind::Storm,
        ];
        Self::new(rng.pick(&KINDS).copied().unwrap_or_default())
    }

    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    /// Apply this turn's weather. Returns an event only when something happened.
    pub fn apply(&mut self, acting: &mut Combatant, defending: &mut Combatant) -> Option<WeatherEvent> {
        let first = !self.applied;
        self.applied = true;

        let one_time = |stat: StatKind, factor: f64, a: &mut Combatant, d: &mut Combatant| {
            a.apply_modifier(stat, StatModifier::multiply(factor));
            d.apply_modifier(stat, StatModifier::multiply(factor));
            WeatherEvent::Slowed { stat, factor }
        };

        match self.kind {
            WeatherKind::Clear => None,
            WeatherKind::Rain if first => Some(one_time(
                StatKind::Speed,
                Self::RAIN_SPEED_FACTOR,
                acting,
                defending,
            )),
            WeatherKind::Fog if first => Some(one_time(
                StatKind::Attack,
                Self::FOG_ATTACK_FACTOR,
                acting,
                defending,
            )),
            WeatherKind::Rain | WeatherKind::Fog => None,
            WeatherKind::Storm => {
                let damage = acting.take_damage(Self::STORM_DAMAGE);
                Some(WeatherEvent::Chip { damage })
            }
        }
    }
}
