//! Fight rules that sit above single actions.
//!
//! These are the pure pieces of the turn state machine: who moves first, how
//! breath is paid, how overtime escalates and when a fight is over. The async
//! controller in the runtime sequences them; nothing here suspends.

pub mod outcome;
pub mod overtime;
pub mod turns;

pub use outcome::{FightOutcome, decide_outcome};
pub use overtime::escalate;
pub use turns::{BreathPayment, first_actor, pay_breath};
