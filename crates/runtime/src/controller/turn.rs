//! Turn preparation, action execution and fight termination.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use fight_core::{
    ActionContext, ActionId, BreathPayment, FightOutcome, OvertimePolicy, Role, decide_outcome,
    escalate, execute_alteration, first_actor, pay_breath, resolve_action,
};

use crate::api::{DisplayError, FightError, Result};
use crate::events::{FightResult, HistoryEntry, HistoryKind};

use super::{FightController, FightState, pair_mut};

impl FightController {
    /// Initialise both fighters, pick the first actor and enter `Running`.
    pub async fn start_fight(&mut self) -> Result<()> {
        if self.state != FightState::NotStarted {
            return Err(FightError::AlreadyStarted);
        }

        for fighter in &self.fighters {
            fighter.hooks().on_fight_start(fighter.combatant()).await;
        }

        let [a, b] = &self.fighters;
        self.acting = first_actor(a.combatant(), b.combatant(), &mut self.rng);
        self.fighters[self.acting]
            .combatant_mut()
            .set_role(Role::Acting);
        self.fighters[1 - self.acting]
            .combatant_mut()
            .set_role(Role::Defending);
        self.state = FightState::Running;

        info!(
            target: "fight::controller",
            seed = self.rng.seed(),
            weather = %self.weather.kind(),
            first = %self.acting().id(),
            "fight started"
        );

        let view = self.view();
        let shown = self.sink.introduce(&view).await;
        self.settle(shown).await
    }

    /// Play one turn: prepare it, then execute the obtained action.
    ///
    /// A no-op once the fight is `Finished` or `Bug`.
    pub async fn step(&mut self) -> Result<FightState> {
        match self.state {
            FightState::NotStarted => return Err(FightError::NotStarted),
            FightState::Finished | FightState::Bug => return Ok(self.state),
            FightState::Running => {}
        }

        if let Some(action) = self.prepare_next_turn().await? {
            self.execute_fight_action(&action, true).await?;
        }
        Ok(self.state)
    }

    /// Execute `requested` for the acting fighter.
    ///
    /// With `end_turn` the turn counter advances and roles swap; without it
    /// the action is a bonus that leaves the turn to the same fighter.
    pub async fn execute_fight_action(&mut self, requested: &ActionId, end_turn: bool) -> Result<()> {
        match self.state {
            FightState::NotStarted => return Err(FightError::NotStarted),
            FightState::Finished | FightState::Bug => return Ok(()),
            FightState::Running => {}
        }

        let registry = Arc::clone(&self.registry);
        let (descriptor, fallback) = registry.resolve(requested);
        if fallback {
            warn!(
                target: "fight::controller",
                turn = self.turn,
                action = %requested,
                "unknown action, falling back to none"
            );
        }

        let fighter = self.acting().id();
        let (breath, resolved) = {
            let (attacker, defender) = pair_mut(&mut self.fighters, self.acting);
            let breath = pay_breath(
                attacker,
                descriptor.breath_cost,
                self.config.out_of_breath_chance,
                &mut self.rng,
            );
            let descriptor = match breath {
                BreathPayment::Downgraded => registry.out_of_breath(),
                BreathPayment::Paid | BreathPayment::Forced => descriptor,
            };

            let ctx = ActionContext {
                registry: &registry,
                formula: &self.formula,
                config: &self.config,
            };
            let resolved = resolve_action(descriptor, attacker, defender, ctx, &mut self.rng);
            if resolved.is_ok() {
                attacker.record_action(descriptor.id.clone());
            }
            (breath, resolved)
        };

        let outcome = match resolved {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.fail(err.into())),
        };

        debug!(
            target: "fight::controller",
            turn = self.turn,
            fighter = %fighter,
            action = %outcome.action,
            ?breath,
            damage = outcome.damage,
            "action resolved"
        );

        let entry = HistoryEntry {
            turn: self.turn,
            fighter,
            kind: HistoryKind::Action {
                requested: requested.clone(),
                breath,
                fallback,
                bonus: !end_turn,
                outcome,
            },
        };
        let shown = self.sink.push_history(&entry).await;
        self.settle(shown).await?;

        if let Some(outcome) = self.current_outcome(false) {
            return self.end_fight(outcome, self.turn).await;
        }

        if end_turn {
            self.end_turn();
            Ok(())
        } else {
            self.show_status().await
        }
    }

    // ========================================================================
    // Turn preparation
    // ========================================================================

    /// Run everything that happens before the acting fighter picks.
    ///
    /// Returns `None` when the fight ended during preparation.
    async fn prepare_next_turn(&mut self) -> Result<Option<ActionId>> {
        let (acting, defending) = pair_mut(&mut self.fighters, self.acting);
        if let Some(event) = self.weather.apply(acting, defending) {
            debug!(target: "fight::weather", turn = self.turn, ?event, "weather applied");
            let shown = self.sink.weather_event(self.weather.kind(), &event).await;
            self.settle(shown).await?;
        }

        // No action of this turn has been played yet.
        if let Some(outcome) = self.current_outcome(self.timed_out()) {
            self.end_fight(outcome, self.turn - 1).await?;
            return Ok(None);
        }

        if self.config.overtime == OvertimePolicy::EscalateScripted
            && self.config.max_turns_reached(self.turn)
            && self.acting().is_scripted()
        {
            self.escalate_scripted().await?;
        }

        if self.run_alteration().await? {
            return Ok(None);
        }

        self.show_status().await?;
        self.fighters[self.acting].combatant_mut().tick_counters();

        if self.rage_bonus_due() {
            self.execute_fight_action(&ActionId::rage(), false).await?;
            if self.state != FightState::Running {
                return Ok(None);
            }
        }

        let queued = self.fighters[self.acting]
            .combatant_mut()
            .take_queued_action();
        let action = match queued {
            Some(action) => action,
            None => {
                let timeout = Duration::from_millis(self.config.choice_timeout_ms);
                let thinking = Duration::from_millis(self.config.thinking_delay_ms);
                self.fighters[self.acting]
                    .request_action(self.turn, &self.registry, &mut self.rng, timeout, thinking)
                    .await
            }
        };
        Ok(Some(action))
    }

    fn timed_out(&self) -> bool {
        match self.config.overtime {
            OvertimePolicy::Draw => self.config.max_turns_reached(self.turn),
            OvertimePolicy::EscalateScripted => self.turn > self.config.hard_turn_limit,
        }
    }

    fn current_outcome(&self, timed_out: bool) -> Option<FightOutcome> {
        let [a, b] = &self.fighters;
        decide_outcome(a.combatant(), b.combatant(), timed_out)
    }

    /// Escalate the acting scripted fighter for one of its overtime turns.
    ///
    /// Pushed multipliers tick on that fighter's own turns only.
    async fn escalate_scripted(&mut self) -> Result<()> {
        let first = !self.escalated[self.acting];
        self.escalated[self.acting] = true;

        let fighter = &mut self.fighters[self.acting];
        escalate(
            fighter.combatant_mut(),
            &self.config.overtime_escalation,
            first,
        );
        let entry = HistoryEntry {
            turn: self.turn,
            fighter: fighter.id(),
            kind: HistoryKind::Escalated,
        };
        debug!(
            target: "fight::controller",
            turn = self.turn,
            fighter = %entry.fighter,
            first,
            multiplier = fighter.combatant().damage_multiplier(),
            "overtime escalation"
        );
        let shown = self.sink.push_history(&entry).await;
        self.settle(shown).await
    }

    /// Execute the acting fighter's alteration. Returns true when it ended
    /// the fight.
    async fn run_alteration(&mut self) -> Result<bool> {
        let fighter = &mut self.fighters[self.acting];
        let Some(effect) = execute_alteration(fighter.combatant_mut(), &self.formula, &mut self.rng)
        else {
            return Ok(false);
        };

        let entry = HistoryEntry {
            turn: self.turn,
            fighter: fighter.id(),
            kind: HistoryKind::Alteration { effect },
        };
        let shown = self.sink.push_history(&entry).await;
        self.settle(shown).await?;

        match self.current_outcome(false) {
            Some(outcome) => {
                self.end_fight(outcome, self.turn).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rage is spent only by a human fighter against a scripted one, on the
    /// first two turns.
    fn rage_bonus_due(&self) -> bool {
        self.turn <= 2
            && self.acting().is_human()
            && self.defending().is_scripted()
            && self.acting().combatant().rage() > 0
    }

    fn end_turn(&mut self) {
        let finished = self.fighters[self.acting].combatant_mut();
        finished.end_turn();
        finished.set_role(Role::Defending);

        self.turn += 1;
        self.acting = 1 - self.acting;

        let next = self.fighters[self.acting].combatant_mut();
        next.set_role(Role::Acting);
        next.regenerate_breath();
    }

    async fn show_status(&mut self) -> Result<()> {
        let view = self.view();
        let shown = self.sink.refresh_status(&view).await;
        self.settle(shown).await
    }

    // ========================================================================
    // Termination
    // ========================================================================

    /// Finish the fight after `turns` played turns.
    async fn end_fight(&mut self, outcome: FightOutcome, turns: u32) -> Result<()> {
        let result = FightResult {
            outcome,
            turns,
            friendly: self.config.friendly,
            fighters: self.statuses(),
        };

        info!(
            target: "fight::controller",
            turns,
            winner = ?result.winner(),
            draw = result.is_draw(),
            "fight finished"
        );

        let shown = self.sink.outcome(&result).await;
        self.settle(shown).await?;

        for fighter in &self.fighters {
            fighter
                .hooks()
                .on_fight_end(fighter.combatant(), &result)
                .await;
        }
        self.release_locks();
        self.state = FightState::Finished;

        if let Some(callback) = self.on_complete.take() {
            callback(&result);
        }
        self.result = Some(result);
        Ok(())
    }

    /// Turn a display result into a fight result, aborting on failure.
    async fn settle(&mut self, shown: std::result::Result<(), DisplayError>) -> Result<()> {
        match shown {
            Ok(()) => Ok(()),
            Err(err) => Err(self.abort(err).await),
        }
    }

    /// Enter `Bug`: release every lock and notify the sink best-effort.
    async fn abort(&mut self, err: DisplayError) -> FightError {
        if self.state == FightState::Bug
            && let Some(failure) = &self.failure
        {
            return failure.clone();
        }

        error!(
            target: "fight::controller",
            turn = self.turn,
            error = %err,
            "display failed, aborting fight"
        );
        self.state = FightState::Bug;
        self.release_locks();

        if let Err(notice) = self.sink.bugged(err.message()).await {
            warn!(target: "fight::controller", error = %notice, "bug notice could not be shown");
        }

        let failure = FightError::Aborted { source: err };
        self.failure = Some(failure.clone());
        failure
    }

    /// Stop on a content defect. The fight ends without a result.
    fn fail(&mut self, failure: FightError) -> FightError {
        error!(
            target: "fight::controller",
            turn = self.turn,
            error = %failure,
            "action could not be resolved"
        );
        self.release_locks();
        self.state = FightState::Finished;
        self.failure = Some(failure.clone());
        failure
    }
}
