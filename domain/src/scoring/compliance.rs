//! Argument length compliance

use crate::core::string::word_count;
use serde::{Deserialize, Serialize};

/// Word budget for one argument (520 words is about four minutes of speech
/// at 130 words per minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordLimit(pub usize);

impl Default for WordLimit {
    fn default() -> Self {
        WordLimit(520)
    }
}

impl WordLimit {
    pub fn words(&self) -> usize {
        self.0
    }

    pub fn check(&self, text: &str) -> WordCountCheck {
        let words = word_count(text);
        WordCountCheck {
            word_count: words,
            limit: self.0,
            compliant: words <= self.0,
        }
    }
}

/// Outcome of a word-count check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountCheck {
    pub word_count: usize,
    pub limit: usize,
    pub compliant: bool,
}

impl WordCountCheck {
    /// Warning line appended to feedback when the limit was exceeded
    pub fn warning(&self) -> Option<String> {
        if self.compliant {
            None
        } else {
            Some(format!(
                "\nWarning: The argument exceeded the {}-word requirement ({} words).\n",
                self.limit, self.word_count
            ))
        }
    }
}
