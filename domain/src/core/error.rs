//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Debate topic cannot be empty")]
    EmptyTopic,

    #[error("A debate needs at least one round")]
    InvalidRoundCount,

    #[error("Debaters must have distinct names (both are '{0}')")]
    DuplicateDebaterName(String),

    #[error("At least one score dimension is required")]
    NoDimensions,

    #[error("Invalid evaluation layer '{focus}': {reason}")]
    InvalidLayer { focus: String, reason: String },

    #[error("Session state violation: {0}")]
    SessionState(String),
}

impl DomainError {
    /// Check if this error was raised by input validation (as opposed to
    /// an internal state violation)
    pub fn is_validation(&self) -> bool {
        !matches!(self, DomainError::SessionState(_))
    }
}
