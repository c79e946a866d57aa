//! Evaluation result value objects

use crate::scoring::compliance::WordCountCheck;
use crate::scoring::score::Score;
use serde::{Deserialize, Serialize};

/// How an argument was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// One generation call per layer, run concurrently
    StrategicLayers,
    /// One combined generation call for every dimension
    SinglePrompt,
}

/// One layer's critique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerCritique {
    pub focus: String,
    pub dimension: String,
    pub text: String,
    /// The layer's generation call failed and `text` is a synthetic error
    pub failed: bool,
}

impl LayerCritique {
    pub fn success(
        focus: impl Into<String>,
        dimension: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            focus: focus.into(),
            dimension: dimension.into(),
            text: text.into(),
            failed: false,
        }
    }

    pub fn failure(
        focus: impl Into<String>,
        dimension: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            focus: focus.into(),
            dimension: dimension.into(),
            text: format!("Error generating analysis: {}", error),
            failed: true,
        }
    }
}

/// Complete evaluation of one argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Combined feedback; the word-count warning, if any, comes last
    pub feedback: String,
    pub score: Score,
    pub word_count: WordCountCheck,
    pub mode: EvaluationMode,
    /// Per-layer critiques in configured layer order (empty in single-prompt mode)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critiques: Vec<LayerCritique>,
}

impl EvaluationResult {
    /// Number of layers whose generation call failed
    pub fn failed_layers(&self) -> usize {
        self.critiques.iter().filter(|c| c.failed).count()
    }
}
