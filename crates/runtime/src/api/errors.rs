//! Unified error types surfaced by the runtime API.
//!
//! Wraps display transport failures and content defects so clients can
//! bubble them up with consistent context.
use thiserror::Error;

use fight_core::ResolveError;

pub type Result<T> = std::result::Result<T, FightError>;

/// Transport failure reported by a display sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display transport failed: {message}")]
pub struct DisplayError {
    message: String,
}

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FightError {
    /// The display sink failed; the fight is in BUG and cannot be resumed.
    #[error("fight aborted")]
    Aborted {
        #[source]
        source: DisplayError,
    },

    /// An action could not be resolved because its content is defective.
    #[error(transparent)]
    Content(#[from] ResolveError),

    #[error("fight already started")]
    AlreadyStarted,

    #[error("fight not started")]
    NotStarted,

    /// The builder was missing a required part.
    #[error("fight builder is missing {0}")]
    Incomplete(&'static str),
}

impl FightError {
    /// True when the fight entered the BUG state.
    pub fn is_abort(&self) -> bool {
        matches!(self, FightError::Aborted { .. })
    }
}
