//! Runtime orchestration of a single fight.
//!
//! This crate drives the rules of `fight-core` through an asynchronous turn
//! loop. Consumers build a [`FightController`], plug in a [`DisplaySink`] and
//! fighters, then [`run`](FightController::run) the fight or advance it one
//! [`step`](FightController::step) at a time.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the turn state machine and its builder
//! - [`fighter`] defines the human-driven and scripted fighter variants
//! - [`api`] exposes the collaborator traits and errors clients implement
//! - [`events`] provides typed fight events and a topic-based event bus
pub mod api;
pub mod controller;
pub mod events;
pub mod fighter;

pub use api::{
    ActionChooser, ChannelChooser, ChoiceRequest, DisplayError, DisplaySink, FightError,
    FighterHooks, NoopHooks, Result, ScriptedChooser,
};
pub use controller::{CompletionCallback, FightBuilder, FightController, FightState};
pub use events::{
    EventBus, FightEvent, FightResult, FightView, FighterStatus, HistoryEntry, HistoryKind,
    RecordingSink, Topic,
};
pub use fighter::{Fighter, HumanFighter, ScriptedFighter};
