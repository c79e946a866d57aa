//! Type definitions for the RunDebate use case.

use crate::config::{DebateParams, EvaluatorConfig};
use debate_domain::{DebaterProfile, DebaterSide, DomainError};
use thiserror::Error;

/// Errors that can stop a debate before round 1.
///
/// Generation failures never appear here; they degrade into inline values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunDebateError {
    #[error("Invalid debate input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Internal session error: {0}")]
    Session(DomainError),
}

impl RunDebateError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RunDebateError::InvalidInput(_))
    }
}

/// A debater slot that produced no result after the round-1 fan-out
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("no argument returned for debater {0}")]
pub struct IncompleteRoundData(pub DebaterSide);

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub topic: String,
    pub debater_a: DebaterProfile,
    pub debater_b: DebaterProfile,
    pub params: DebateParams,
    pub judge: EvaluatorConfig,
}

impl RunDebateInput {
    pub fn new(
        topic: impl Into<String>,
        debater_a: DebaterProfile,
        debater_b: DebaterProfile,
    ) -> Self {
        Self {
            topic: topic.into(),
            debater_a,
            debater_b,
            params: DebateParams::default(),
            judge: EvaluatorConfig::default(),
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_judge(mut self, judge: EvaluatorConfig) -> Self {
        self.judge = judge;
        self
    }
}
