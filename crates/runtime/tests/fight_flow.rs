use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fight_core::{
    ActionDescriptor, ActionEffect, ActionId, ActionRegistry, Alteration, AlterationEffect,
    AttackInfo, BreathPayment, Combatant, CoreStats, FightConfig, FightOutcome, FightWeather,
    FighterId, MonsterAttack, OvertimePolicy, ResolveError, ResourceMeter, WeatherEvent,
    WeatherKind,
};
use fight_runtime::{
    ChannelChooser, DisplayError, DisplaySink, EventBus, FightController, FightError, FightEvent,
    FightResult, FightState, FightView, FighterHooks, HistoryEntry, HistoryKind, HumanFighter,
    RecordingSink, ScriptedChooser, ScriptedFighter, Topic,
};

// ============================================================================
// Fixtures
// ============================================================================

fn registry() -> Arc<ActionRegistry> {
    let registry = ActionRegistry::new(vec![
        ActionDescriptor::new(ActionId::NONE, ActionEffect::NoAction).with_ai_weight(0),
        ActionDescriptor::new(ActionId::OUT_OF_BREATH, ActionEffect::OutOfBreath).with_ai_weight(0),
        ActionDescriptor::new(ActionId::RAGE, ActionEffect::Rage).with_ai_weight(0),
        ActionDescriptor::attack("jab", AttackInfo::new(10, 20, 30))
            .with_cost(1)
            .with_repeat_penalty(),
        ActionDescriptor::attack("nuke", AttackInfo::new(500, 500, 500)).with_cost(1),
        ActionDescriptor::attack("kamikaze", AttackInfo::new(500, 500, 500)).with_recoil(1.0),
        ActionDescriptor::attack("pricey", AttackInfo::new(10, 20, 30)).with_cost(5),
        ActionDescriptor::new("guard", ActionEffect::Support),
        ActionDescriptor::new("broken", ActionEffect::Damage),
    ])
    .expect("valid registry");
    Arc::new(registry)
}

fn config() -> FightConfig {
    FightConfig {
        thinking_delay_ms: 0,
        choice_timeout_ms: 1_000,
        ..FightConfig::default()
    }
}

fn combatant(id: u64, speed: u32, fight_points: u32, breath: u32) -> Combatant {
    Combatant::new(
        id,
        format!("fighter-{id}"),
        75,
        CoreStats::new(100, 100, speed),
        ResourceMeter::full(fight_points),
        ResourceMeter::new(breath, 10),
        0,
    )
}

fn human(id: u64, speed: u32, fight_points: u32, script: &[&str]) -> HumanFighter {
    let chooser = ScriptedChooser::new(script.iter().map(|id| ActionId::new(*id)));
    HumanFighter::new(combatant(id, speed, fight_points, 10), Arc::new(chooser))
}

fn monster(id: u64, speed: u32, fight_points: u32) -> ScriptedFighter {
    ScriptedFighter::new(
        combatant(id, speed, fight_points, 10),
        vec![MonsterAttack::new("guard")],
    )
}

fn actions_of(sink: &RecordingSink, fighter: u64) -> Vec<(u32, ActionId, BreathPayment, bool)> {
    sink.history()
        .into_iter()
        .filter(|entry| entry.fighter == FighterId(fighter))
        .filter_map(|entry| match entry.kind {
            HistoryKind::Action {
                breath,
                bonus,
                outcome,
                ..
            } => Some((entry.turn, outcome.action, breath, bonus)),
            _ => None,
        })
        .collect()
}

/// Counts hook invocations.
#[derive(Default)]
struct CountingHooks {
    started: AtomicUsize,
    ended: AtomicUsize,
    released: AtomicUsize,
}

#[async_trait]
impl FighterHooks for CountingHooks {
    async fn on_fight_start(&self, _fighter: &Combatant) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    async fn on_fight_end(&self, _fighter: &Combatant, _result: &FightResult) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }

    fn release_lock(&self, _fighter: FighterId) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sink whose status refresh always fails.
#[derive(Default)]
struct BrokenStatusSink {
    inner: RecordingSink,
}

#[async_trait]
impl DisplaySink for BrokenStatusSink {
    async fn introduce(&self, view: &FightView) -> Result<(), DisplayError> {
        self.inner.introduce(view).await
    }

    async fn push_history(&self, entry: &HistoryEntry) -> Result<(), DisplayError> {
        self.inner.push_history(entry).await
    }

    async fn refresh_status(&self, _view: &FightView) -> Result<(), DisplayError> {
        Err(DisplayError::new("message deleted"))
    }

    async fn weather_event(&self, kind: WeatherKind, event: &WeatherEvent) -> Result<(), DisplayError> {
        self.inner.weather_event(kind, event).await
    }

    async fn outcome(&self, result: &FightResult) -> Result<(), DisplayError> {
        self.inner.outcome(result).await
    }

    async fn bugged(&self, reason: &str) -> Result<(), DisplayError> {
        self.inner.bugged(reason).await
    }
}

// ============================================================================
// Turn order
// ============================================================================

#[tokio::test]
async fn faster_fighter_acts_on_turn_one() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(monster(2, 30, 1_000), human(1, 50, 1_000, &["jab"]))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(1)
        .build()
        .unwrap();

    fight.start_fight().await.unwrap();
    assert_eq!(fight.acting().id(), FighterId(1));

    fight.step().await.unwrap();
    let first = &sink.history()[0];
    assert_eq!((first.turn, first.fighter), (1, FighterId(1)));
    assert_eq!(fight.acting().id(), FighterId(2));
}

#[tokio::test]
async fn equal_speed_splits_first_turn() {
    let mut first_a = 0;
    for seed in 0..400 {
        let mut fight = FightController::builder()
            .fighters(human(1, 40, 1_000, &[]), monster(2, 40, 1_000))
            .config(config())
            .registry(registry())
            .seed(seed)
            .build()
            .unwrap();
        fight.start_fight().await.unwrap();
        if fight.acting().id() == FighterId(1) {
            first_a += 1;
        }
    }
    assert!((150..=250).contains(&first_a), "first_a = {first_a}");
}

#[tokio::test]
async fn turn_counter_moves_only_when_the_turn_ends() {
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 1_000, &[]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .seed(3)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();

    fight
        .execute_fight_action(&ActionId::new("jab"), false)
        .await
        .unwrap();
    assert_eq!(fight.turn(), 1);
    assert_eq!(fight.acting().id(), FighterId(1));

    fight
        .execute_fight_action(&ActionId::new("jab"), true)
        .await
        .unwrap();
    assert_eq!(fight.turn(), 2);
    assert_eq!(fight.acting().id(), FighterId(2));
}

#[tokio::test]
async fn lifecycle_errors() {
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 1_000, &[]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .build()
        .unwrap();

    assert_eq!(fight.step().await, Err(FightError::NotStarted));
    fight.start_fight().await.unwrap();
    assert_eq!(fight.start_fight().await, Err(FightError::AlreadyStarted));

    let missing = FightController::builder().registry(registry()).build();
    assert!(matches!(missing, Err(FightError::Incomplete("fighters"))));
}

// ============================================================================
// Actions
// ============================================================================

/// Play one turn where fighter 1 cannot afford `pricey`.
async fn short_of_breath(seed: u64) -> (BreathPayment, ActionId, FightController) {
    let sink = Arc::new(RecordingSink::new());
    let attacker = HumanFighter::new(
        combatant(1, 50, 1_000, 1),
        Arc::new(ScriptedChooser::new([ActionId::new("pricey")])),
    );
    let mut fight = FightController::builder()
        .fighters(attacker, monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(seed)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();

    let (_, action, breath, _) = actions_of(&sink, 1).remove(0);
    (breath, action, fight)
}

#[tokio::test]
async fn short_breath_downgrades_or_forces() {
    assert_eq!(config().out_of_breath_chance, 0.8);

    let mut downgraded = None;
    let mut forced = None;
    for seed in 0..64 {
        let (breath, _, _) = short_of_breath(seed).await;
        match breath {
            BreathPayment::Downgraded => downgraded = downgraded.or(Some(seed)),
            BreathPayment::Forced => forced = forced.or(Some(seed)),
            BreathPayment::Paid => panic!("1 breath cannot pay for 5"),
        }
    }
    let downgraded = downgraded.expect("some seed downgrades");
    let forced = forced.expect("some seed forces");

    // Same seed, same branch.
    let (breath, action, fight) = short_of_breath(downgraded).await;
    assert_eq!(breath, BreathPayment::Downgraded);
    assert_eq!(action, ActionId::out_of_breath());
    assert_eq!(fight.fighters()[0].combatant().breath().current, 1);
    assert_eq!(fight.fighters()[1].combatant().fight_points().current, 1_000);

    let (breath, action, fight) = short_of_breath(forced).await;
    assert_eq!(breath, BreathPayment::Forced);
    assert_eq!(action, ActionId::new("pricey"));
    assert_eq!(fight.fighters()[0].combatant().breath().current, 0);
    assert!(fight.fighters()[1].combatant().fight_points().current < 1_000);
}

#[tokio::test]
async fn fourth_consecutive_use_is_penalised() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(
            human(1, 50, 10_000, &["jab", "jab", "jab", "jab"]),
            monster(2, 30, 10_000),
        )
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(5)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    for _ in 0..8 {
        fight.step().await.unwrap();
    }

    let penalised: Vec<bool> = sink
        .history()
        .into_iter()
        .filter(|entry| entry.fighter == FighterId(1))
        .filter_map(|entry| match entry.kind {
            HistoryKind::Action { outcome, .. } => Some(outcome.penalised),
            _ => None,
        })
        .collect();
    assert_eq!(penalised, vec![false, false, false, true]);
}

#[tokio::test]
async fn rage_is_a_bonus_action_against_scripted_fighters() {
    let sink = Arc::new(RecordingSink::new());
    let raging = HumanFighter::new(
        combatant(1, 50, 1_000, 10).with_rage(3),
        Arc::new(ScriptedChooser::new([ActionId::new("guard")])),
    );
    let mut fight = FightController::builder()
        .fighters(raging, monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(6)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();

    let actions = actions_of(&sink, 1);
    assert_eq!(actions[0], (1, ActionId::rage(), BreathPayment::Paid, true));
    assert_eq!(actions[1], (1, ActionId::new("guard"), BreathPayment::Paid, false));
    // 3 points × 8 damage
    assert_eq!(fight.fighters()[1].combatant().fight_points().current, 976);
    assert_eq!(fight.turn(), 2);
}

#[tokio::test(start_paused = true)]
async fn silent_human_times_out_to_none() {
    let sink = Arc::new(RecordingSink::new());
    let (chooser, _input) = ChannelChooser::new(1);
    let silent = HumanFighter::new(combatant(1, 50, 1_000, 10), Arc::new(chooser));
    let mut fight = FightController::builder()
        .fighters(silent, monster(2, 30, 1_000))
        .config(FightConfig {
            choice_timeout_ms: 30_000,
            ..config()
        })
        .registry(registry())
        .sink(sink.clone())
        .seed(7)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();

    let (turn, action, _, _) = actions_of(&sink, 1).remove(0);
    assert_eq!((turn, action), (1, ActionId::none()));
    assert_eq!(fight.state(), FightState::Running);
}

// ============================================================================
// Turn preparation
// ============================================================================

fn afflicted(alteration: Alteration, script: &[&str]) -> HumanFighter {
    let mut unit = combatant(1, 50, 1_000, 10);
    assert!(unit.apply_alteration(alteration));
    let chooser = ScriptedChooser::new(script.iter().map(|id| ActionId::new(*id)));
    HumanFighter::new(unit, Arc::new(chooser))
}

#[tokio::test]
async fn poison_runs_before_the_action_without_ending_the_turn() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(afflicted(Alteration::Poisoned, &["guard"]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(14)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();

    let history = sink.history();
    let damage = match &history[0] {
        HistoryEntry {
            turn: 1,
            fighter: FighterId(1),
            kind: HistoryKind::Alteration {
                effect: AlterationEffect::Poisoned { damage },
            },
        } => *damage,
        other => panic!("unexpected entry: {other:?}"),
    };
    assert!(damage > 0);
    assert_eq!(actions_of(&sink, 1), vec![(1, ActionId::new("guard"), BreathPayment::Paid, false)]);
    assert_eq!(fight.fighters()[0].combatant().fight_points().current, 1_000 - damage);
    assert_eq!(fight.turn(), 2);
}

#[tokio::test]
async fn stun_replaces_the_choice_with_none() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(afflicted(Alteration::Stunned, &["nuke"]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(15)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();

    assert!(matches!(
        sink.history()[0].kind,
        HistoryKind::Alteration {
            effect: AlterationEffect::Stunned
        }
    ));
    assert_eq!(actions_of(&sink, 1), vec![(1, ActionId::none(), BreathPayment::Paid, false)]);
    assert_eq!(fight.fighters()[1].combatant().fight_points().current, 1_000);
    assert_eq!(fight.turn(), 2);
}

fn weather_events(sink: &RecordingSink) -> Vec<WeatherEvent> {
    sink.events()
        .into_iter()
        .filter_map(|event| match event {
            FightEvent::Weather { event, .. } => Some(event),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn storm_chips_whoever_acts() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 1_000, &["guard"]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .weather(WeatherKind::Storm)
        .seed(16)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    fight.step().await.unwrap();
    fight.step().await.unwrap();

    let chip = WeatherEvent::Chip {
        damage: FightWeather::STORM_DAMAGE,
    };
    assert_eq!(weather_events(&sink), vec![chip, chip]);
    for fighter in fight.fighters() {
        assert_eq!(
            fighter.combatant().fight_points().current,
            1_000 - FightWeather::STORM_DAMAGE
        );
    }
}

#[tokio::test]
async fn rain_slows_both_fighters_once() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 1_000, &["guard"]), monster(2, 30, 1_000))
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .weather(WeatherKind::Rain)
        .seed(17)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    for _ in 0..3 {
        fight.step().await.unwrap();
    }

    assert_eq!(weather_events(&sink).len(), 1);
    let [player, beast] = fight.fighters();
    assert!((player.combatant().speed() - 50.0 * FightWeather::RAIN_SPEED_FACTOR).abs() < 1e-9);
    assert!((beast.combatant().speed() - 30.0 * FightWeather::RAIN_SPEED_FACTOR).abs() < 1e-9);
}

// ============================================================================
// Termination
// ============================================================================

#[tokio::test]
async fn knockout_ends_with_a_winner() {
    let hooks = Arc::new(CountingHooks::default());
    let completed = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&completed);

    let mut fight = FightController::builder()
        .fighters(
            human(1, 50, 1_000, &["nuke"]).with_hooks(hooks.clone()),
            monster(2, 30, 100).with_hooks(hooks.clone()),
        )
        .config(config())
        .registry(registry())
        .seed(8)
        .on_complete(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let result = fight.run().await.unwrap();
    assert_eq!(
        result.outcome,
        FightOutcome::Victory {
            winner: FighterId(1),
            loser: FighterId(2),
        }
    );
    assert_eq!(result.turns, 1);
    assert_eq!(fight.state(), FightState::Finished);
    assert_eq!(hooks.started.load(Ordering::SeqCst), 2);
    assert_eq!(hooks.ended.load(Ordering::SeqCst), 2);
    assert_eq!(hooks.released.load(Ordering::SeqCst), 2);
    assert_eq!(completed.load(Ordering::SeqCst), 1);

    // Further steps are no-ops.
    assert_eq!(fight.step().await, Ok(FightState::Finished));
    assert_eq!(hooks.released.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn both_fighters_dead_is_a_draw() {
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 100, &["kamikaze"]), monster(2, 30, 100))
        .config(config())
        .registry(registry())
        .seed(9)
        .build()
        .unwrap();

    let result = fight.run().await.unwrap();
    assert!(result.is_draw());
    assert!(result.fighters.iter().all(|f| f.fight_points.current == 0));
}

#[tokio::test]
async fn max_turns_is_a_draw() {
    let sink = Arc::new(RecordingSink::new());
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 10_000, &["jab", "jab"]), monster(2, 30, 10_000))
        .config(config().with_max_turns(4))
        .registry(registry())
        .sink(sink.clone())
        .seed(10)
        .build()
        .unwrap();

    let result = fight.run().await.unwrap();
    assert!(result.is_draw());
    assert_eq!(result.turns, 4);
    assert_eq!(actions_of(&sink, 1).len() + actions_of(&sink, 2).len(), 4);
    assert!(matches!(sink.events().last(), Some(FightEvent::Outcome(_))));
}

#[tokio::test]
async fn overtime_escalation_stays_bounded_until_the_hard_limit() {
    let sink = Arc::new(RecordingSink::new());
    let overtime = FightConfig {
        overtime: OvertimePolicy::EscalateScripted,
        hard_turn_limit: 14,
        ..config().with_max_turns(2)
    };
    let escalation = overtime.overtime_escalation.clone();
    let ceiling = escalation
        .damage_multiplier
        .powi(escalation.damage_multiplier_turns as i32);

    // Fighter 1 acts on odd turns, the monster on even ones.
    let mut fight = FightController::builder()
        .fighters(human(1, 50, 10_000, &[]), monster(2, 30, 10_000))
        .config(overtime)
        .registry(registry())
        .sink(sink.clone())
        .seed(18)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();
    while fight.step().await.unwrap() == FightState::Running {
        let multiplier = fight.fighters()[1].combatant().damage_multiplier();
        assert!(multiplier <= ceiling + 1e-9, "turn {}: {multiplier}", fight.turn());
    }

    let result = fight.result().cloned().unwrap();
    assert!(result.is_draw());
    assert_eq!(result.turns, 14);

    // Monster turns 4, 6, .., 14 escalate; each multiplier lasts 5 of its turns.
    let escalated: Vec<(u32, FighterId)> = sink
        .history()
        .into_iter()
        .filter(|entry| matches!(entry.kind, HistoryKind::Escalated))
        .map(|entry| (entry.turn, entry.fighter))
        .collect();
    assert_eq!(escalated, (4..=14).step_by(2).map(|turn| (turn, FighterId(2))).collect::<Vec<_>>());

    let [player, beast] = fight.fighters();
    assert!((beast.combatant().damage_multiplier() - 1.1f64.powi(4)).abs() < 1e-9);
    assert!((beast.combatant().attack() - 100.0 * escalation.stat_step_up).abs() < 1e-9);
    assert_eq!(player.combatant().damage_multiplier(), 1.0);
    assert!((player.combatant().attack() - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn display_failure_aborts_and_releases_locks_once() {
    let sink = Arc::new(BrokenStatusSink::default());
    let first = Arc::new(CountingHooks::default());
    let second = Arc::new(CountingHooks::default());
    let mut fight = FightController::builder()
        .fighters(
            human(1, 50, 1_000, &["jab"]).with_hooks(first.clone()),
            monster(2, 30, 1_000).with_hooks(second.clone()),
        )
        .config(config())
        .registry(registry())
        .sink(sink.clone())
        .seed(11)
        .build()
        .unwrap();
    fight.start_fight().await.unwrap();

    let err = fight.step().await.unwrap_err();
    assert!(err.is_abort());
    assert_eq!(fight.state(), FightState::Bug);

    // Stays aborted.
    assert_eq!(fight.step().await, Ok(FightState::Bug));
    assert!(fight.run().await.unwrap_err().is_abort());

    for hooks in [&first, &second] {
        assert_eq!(hooks.released.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.ended.load(Ordering::SeqCst), 0);
    }
    assert!(fight.result().is_none());
    assert!(matches!(
        sink.inner.events().last(),
        Some(FightEvent::Bugged { .. })
    ));
}

#[tokio::test]
async fn defective_action_surfaces_as_content_error() {
    let hooks = Arc::new(CountingHooks::default());
    let mut fight = FightController::builder()
        .fighters(
            human(1, 50, 1_000, &["broken"]).with_hooks(hooks.clone()),
            monster(2, 30, 1_000),
        )
        .config(config())
        .registry(registry())
        .seed(12)
        .build()
        .unwrap();

    let err = fight.run().await.unwrap_err();
    assert_eq!(
        err,
        FightError::Content(ResolveError::MissingAttackInfo(ActionId::new("broken")))
    );
    assert_eq!(fight.state(), FightState::Finished);
    assert!(fight.result().is_none());
    assert_eq!(hooks.released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn event_bus_delivers_the_outcome() {
    let bus = Arc::new(EventBus::new());
    let mut outcomes = bus.subscribe(Topic::Outcome);

    let mut fight = FightController::builder()
        .fighters(human(1, 50, 1_000, &["nuke"]), monster(2, 30, 100))
        .config(config())
        .registry(registry())
        .sink(bus.clone())
        .seed(13)
        .build()
        .unwrap();
    fight.run().await.unwrap();

    match outcomes.recv().await.unwrap() {
        FightEvent::Outcome(result) => assert_eq!(result.winner(), Some(FighterId(1))),
        other => panic!("unexpected event: {other:?}"),
    }
}
