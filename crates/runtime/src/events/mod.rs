//! Fight events.
//!
//! Everything the controller shows a display sink is also available as a
//! typed [`FightEvent`]. [`EventBus`] fans events out by topic to any number
//! of subscribers; [`RecordingSink`] keeps them in memory.

mod bus;
mod recorder;
mod types;

pub use bus::{EventBus, Topic};
pub use recorder::RecordingSink;
pub use types::{FightEvent, FightResult, FightView, FighterStatus, HistoryEntry, HistoryKind};
