//! Action catalog and resolution.
//!
//! # Architecture
//!
//! ```text
//! [ ActionDescriptor ]  data: cost, stat inputs, attack info, buffs, alteration
//!        ↓ loaded once
//! [ ActionRegistry ]    immutable, id-keyed, validated at construction
//!        ↓ looked up per turn
//! [ resolve_action ]    pure resolution against (attacker, defender, rng)
//!        ↓
//! [ ActionOutcome ]     what happened, reported to the display layer
//! ```
//!
//! The registry is built explicitly and injected into the controller; there
//! is no global catalog. Unknown ids resolve to the builtin `none` action.

pub mod execute;
pub mod registry;
pub mod types;

pub use execute::{ActionContext, ActionOutcome, resolve_action};
pub use registry::ActionRegistry;
pub use types::{
    ActionDescriptor, ActionEffect, ActionId, AlterationChance, Buff, Side, StatInput, StatSource,
    Target,
};
