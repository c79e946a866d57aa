//! Score dimensions

use serde::{Deserialize, Serialize};

/// One named scoring dimension.
///
/// `key` identifies the dimension in scores and exports; `label` is the
/// upper-case marker text a judge must emit, as in `LOGICAL CONSISTENCY SCORE: 8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreDimension {
    pub key: String,
    pub label: String,
}

impl ScoreDimension {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// The parse key searched for in responses (`<LABEL> SCORE`)
    pub fn marker(&self) -> String {
        format!("{} SCORE", self.label)
    }

    pub fn logic() -> Self {
        Self::new("logic", "LOGICAL CONSISTENCY")
    }

    pub fn persuasive() -> Self {
        Self::new("persuasive", "PERSUASIVE QUALITY")
    }

    pub fn factual() -> Self {
        Self::new("factual", "FACTUAL ACCURACY")
    }

    pub fn belief() -> Self {
        Self::new("belief", "BELIEF-SHIFT")
    }

    /// The four built-in dimensions in display order
    pub fn standard() -> Vec<ScoreDimension> {
        vec![
            Self::logic(),
            Self::persuasive(),
            Self::factual(),
            Self::belief(),
        ]
    }
}
