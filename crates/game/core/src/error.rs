//! Error types for fight-core.
//!
//! Two families exist:
//!
//! - [`RegistryError`]: the action catalog is inconsistent. Raised once, when
//!   the registry is built, and never at fight time.
//! - [`ResolveError`]: an action could not be resolved mid-fight because its
//!   content is misconfigured. The fight cannot continue.
//!
//! Neither is retryable: both point at a content defect, not a runtime
//! condition.

use crate::action::ActionId;

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input data; fix the content and reload.
    Validation,
    /// Inconsistent state discovered while running.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Failures while building an [`ActionRegistry`](crate::ActionRegistry).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate action id `{0}`")]
    DuplicateAction(ActionId),

    #[error("builtin action `{0}` is missing from the catalog")]
    MissingBuiltin(&'static str),

    #[error("action `{action}` references unknown action `{reference}`")]
    UnknownReference { action: ActionId, reference: ActionId },

    #[error("action `{action}`: {field} = {value} is outside {min}..={max}")]
    OutOfRange {
        action: ActionId,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("action `{0}`: attack info must satisfy min <= average <= max")]
    UnorderedAttackInfo(ActionId),
}

impl RegistryError {
    pub const fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Content defects found while resolving an action during a fight.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("damage action `{0}` has no attack info")]
    MissingAttackInfo(ActionId),

    #[error("damage action `{0}` has no stat inputs")]
    MissingStatInputs(ActionId),

    #[error("action `{action}` chains to unknown action `{follow_up}`")]
    UnknownFollowUp { action: ActionId, follow_up: ActionId },
}

impl ResolveError {
    pub const fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    /// Action whose content is defective.
    pub fn action(&self) -> &ActionId {
        match self {
            Self::MissingAttackInfo(action) | Self::MissingStatInputs(action) => action,
            Self::UnknownFollowUp { action, .. } => action,
        }
    }
}
