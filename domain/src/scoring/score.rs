//! Score value objects

use super::dimension::ScoreDimension;
use serde::{Deserialize, Serialize};

/// Lowest value a dimension can hold
pub const SCORE_MIN: f64 = 0.0;
/// Highest value a dimension can hold
pub const SCORE_MAX: f64 = 10.0;

/// Value for one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub key: String,
    pub value: f64,
}

/// Whether a score came from the response or from the fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Every configured dimension was extracted
    Complete,
    /// Extraction failed; every dimension holds the documented default
    Defaulted { reason: String },
}

/// Per-dimension scores for one evaluated argument.
///
/// A score always covers every configured dimension, in configured order.
/// There is no partially-filled state: see [`ScoreStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    entries: Vec<DimensionScore>,
    #[serde(flatten)]
    status: ScoreStatus,
}

impl Score {
    /// Build a complete score. Values are clamped to `SCORE_MIN..=SCORE_MAX`.
    pub fn complete(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| DimensionScore {
                    key,
                    value: value.clamp(SCORE_MIN, SCORE_MAX),
                })
                .collect(),
            status: ScoreStatus::Complete,
        }
    }

    /// Build a defaulted score with `value` for every dimension.
    pub fn defaulted(dimensions: &[ScoreDimension], value: f64, reason: impl Into<String>) -> Self {
        Self {
            entries: dimensions
                .iter()
                .map(|d| DimensionScore {
                    key: d.key.clone(),
                    value,
                })
                .collect(),
            status: ScoreStatus::Defaulted {
                reason: reason.into(),
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn entries(&self) -> &[DimensionScore] {
        &self.entries
    }

    pub fn status(&self) -> &ScoreStatus {
        &self.status
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, ScoreStatus::Complete)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    pub fn mean(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.total() / self.entries.len() as f64
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}={}", e.key, e.value))
            .collect();
        write!(f, "{}", parts.join(", "))?;
        if let ScoreStatus::Defaulted { .. } = self.status {
            write!(f, " (defaulted)")?;
        }
        Ok(())
    }
}
