//! Public runtime API surface.
//!
//! The engine depends on, but does not implement, these collaborators:
//! - [`DisplaySink`]: presentation of the fight
//! - [`ActionChooser`]: a human-driven fighter's input
//! - [`FighterHooks`]: persistence and lock release around the fight

pub mod chooser;
pub mod display;
pub mod errors;
pub mod hooks;

pub use chooser::{ActionChooser, ChannelChooser, ChoiceRequest, ScriptedChooser};
pub use display::DisplaySink;
pub use errors::{DisplayError, FightError, Result};
pub use hooks::{FighterHooks, NoopHooks};
