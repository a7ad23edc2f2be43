//! Terminal display sink.
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use fight_core::{ActionOutcome, BreathPayment, FighterId, HitKind, WeatherEvent, WeatherKind};
use fight_runtime::{
    DisplayError, DisplaySink, FightEvent, FightResult, FightView, FighterStatus, HistoryEntry,
    HistoryKind,
};

/// Prints the fight to stdout, as text or as JSON lines.
#[derive(Debug, Default)]
pub struct TerminalSink {
    json: bool,
    names: Mutex<HashMap<FighterId, String>>,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            names: Mutex::default(),
        }
    }

    fn name(&self, id: FighterId) -> String {
        self.names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Emit `event` as JSON, or `text` otherwise.
    fn emit(&self, event: FightEvent, text: impl FnOnce() -> String) -> Result<(), DisplayError> {
        let line = if self.json {
            serde_json::to_string(&event).map_err(|e| DisplayError::new(e.to_string()))?
        } else {
            text()
        };
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").map_err(|e| DisplayError::new(e.to_string()))
    }

    fn describe(&self, entry: &HistoryEntry) -> String {
        let who = self.name(entry.fighter);
        let body = match &entry.kind {
            HistoryKind::Action {
                requested,
                breath,
                fallback,
                bonus,
                outcome,
            } => {
                let mut text = format!("{who} uses {}", outcome.action);
                if *fallback {
                    text.push_str(&format!(" (unknown action {requested})"));
                }
                if *breath == BreathPayment::Downgraded {
                    text.push_str(&format!(" (too tired for {requested})"));
                }
                if *bonus {
                    text.push_str(" [bonus]");
                }
                text.push_str(&effects(outcome));
                text
            }
            HistoryKind::Alteration { effect } => format!("{who}: {effect:?}"),
            HistoryKind::Escalated => format!("{who} grows stronger with overtime"),
        };
        format!("[turn {:>2}] {body}", entry.turn)
    }
}

fn effects(outcome: &ActionOutcome) -> String {
    let mut parts = Vec::new();
    match outcome.hit {
        Some(HitKind::Critical) => parts.push(format!("critical hit for {}", outcome.damage)),
        Some(HitKind::Missed) => parts.push(format!("glancing blow for {}", outcome.damage)),
        Some(HitKind::Normal) => parts.push(format!("{} damage", outcome.damage)),
        None if outcome.damage > 0 => parts.push(format!("{} damage", outcome.damage)),
        None => {}
    }
    if outcome.penalised {
        parts.push("worn out by repetition".to_owned());
    }
    if outcome.recoil > 0 {
        parts.push(format!("{} recoil", outcome.recoil));
    }
    if outcome.healed > 0 {
        parts.push(format!("heals {}", outcome.healed));
    }
    if outcome.breath_restored > 0 {
        parts.push(format!("recovers {} breath", outcome.breath_restored));
    }
    if let Some((alteration, target)) = outcome.alteration {
        parts.push(format!("{alteration:?} on {target:?}"));
    }
    if let Some(queued) = &outcome.queued {
        parts.push(format!("prepares {queued}"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(": {}", parts.join(", "))
    }
}

fn status_line(status: &FighterStatus) -> String {
    format!(
        "    {:<12} FP {:>4}/{:<4} breath {:>2}/{:<2} atk {:>5.1} def {:>5.1} spd {:>5.1} {:?}",
        status.name,
        status.fight_points.current,
        status.fight_points.maximum,
        status.breath.current,
        status.breath.maximum,
        status.attack,
        status.defense,
        status.speed,
        status.alteration,
    )
}

#[async_trait]
impl DisplaySink for TerminalSink {
    async fn introduce(&self, view: &FightView) -> Result<(), DisplayError> {
        {
            let mut names = self.names.lock().unwrap_or_else(PoisonError::into_inner);
            for fighter in &view.fighters {
                names.insert(fighter.id, fighter.name.clone());
            }
        }
        let [a, b] = &view.fighters;
        self.emit(FightEvent::Introduced(view.clone()), || {
            format!(
                "== {} (lvl {}) vs {} (lvl {}), weather: {} ==",
                a.name, a.level, b.name, b.level, view.weather
            )
        })
    }

    async fn push_history(&self, entry: &HistoryEntry) -> Result<(), DisplayError> {
        self.emit(FightEvent::History(entry.clone()), || self.describe(entry))
    }

    async fn refresh_status(&self, view: &FightView) -> Result<(), DisplayError> {
        self.emit(FightEvent::Status(view.clone()), || {
            view.fighters
                .iter()
                .map(status_line)
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    async fn weather_event(&self, kind: WeatherKind, event: &WeatherEvent) -> Result<(), DisplayError> {
        self.emit(FightEvent::Weather { kind, event: *event }, || match event {
            WeatherEvent::Slowed { stat, factor } => {
                format!("[weather] {kind}: {stat:?} ×{factor} for everyone")
            }
            WeatherEvent::Chip { damage } => format!("[weather] {kind}: {damage} damage"),
        })
    }

    async fn outcome(&self, result: &FightResult) -> Result<(), DisplayError> {
        self.emit(FightEvent::Outcome(result.clone()), || match result.winner() {
            Some(winner) => format!("== {} wins on turn {} ==", self.name(winner), result.turns),
            None => format!("== draw after {} turns ==", result.turns),
        })
    }

    async fn bugged(&self, reason: &str) -> Result<(), DisplayError> {
        self.emit(
            FightEvent::Bugged {
                reason: reason.to_owned(),
            },
            || format!("!! fight aborted: {reason}"),
        )
    }
}
