//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section uses `#[serde(default)]`, so a partial file only overrides
//! the keys it names.

mod debate;
mod debaters;
mod judge;
mod logging;
mod providers;

pub use debate::FileDebateConfig;
pub use debaters::{FileDebaterConfig, FileDebatersConfig};
pub use judge::FileJudgeConfig;
pub use logging::FileLoggingConfig;
pub use providers::{FileProviderEndpoint, FileProvidersConfig};

use debate_application::{DebateParams, EvaluatorConfig};
use debate_domain::DebaterProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("rounds must be at least 1")]
    InvalidRounds,

    #[error("word_limit cannot be 0")]
    InvalidWordLimit,

    #[error("history_window cannot be 0")]
    InvalidHistoryWindow,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty ({0})")]
    EmptyModelName(&'static str),

    #[error("both debaters are named '{0}'")]
    DuplicateDebaterName(String),

    #[error("unknown provider '{0}' (expected gemini, perplexity or openai)")]
    UnknownProvider(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub debate: FileDebateConfig,
    pub debaters: FileDebatersConfig,
    pub judge: FileJudgeConfig,
    pub providers: FileProvidersConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Reject values the debate cannot run with; the first problem wins
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.debate.rounds == 0 {
            return Err(ConfigValidationError::InvalidRounds);
        }
        if self.debate.word_limit == 0 {
            return Err(ConfigValidationError::InvalidWordLimit);
        }
        if self.debate.history_window == 0 {
            return Err(ConfigValidationError::InvalidHistoryWindow);
        }
        if self.debate.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for (field, model) in [
            ("debaters.a.model", &self.debaters.a.model),
            ("debaters.b.model", &self.debaters.b.model),
            ("judge.model", &self.judge.model),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(field));
            }
        }

        let name_a = self.debaters.a.name.trim();
        if name_a == self.debaters.b.name.trim() {
            return Err(ConfigValidationError::DuplicateDebaterName(name_a.to_string()));
        }

        if let Some(name) = self.providers.unknown_provider_names().into_iter().next() {
            return Err(ConfigValidationError::UnknownProvider(name));
        }

        Ok(())
    }

    pub fn debate_params(&self) -> DebateParams {
        self.debate.to_debate_params()
    }

    pub fn evaluator_config(&self) -> EvaluatorConfig {
        self.judge.to_evaluator_config(&self.debate)
    }

    pub fn debater_profiles(&self) -> (DebaterProfile, DebaterProfile) {
        (self.debaters.a.to_profile(), self.debaters.b.to_profile())
    }
}
