//! Argument value object

use crate::core::string::word_count;
use serde::{Deserialize, Serialize};

/// Which kind of call produced an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    Opening,
    Rebuttal,
    Revision,
}

/// Text produced by one debater call.
///
/// A degraded argument stands in for a failed call: it carries the failure
/// description in both `text` and `error` and is scored like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub round: u32,
    pub debater: String,
    pub kind: ArgumentKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Argument {
    pub fn new(
        round: u32,
        debater: impl Into<String>,
        kind: ArgumentKind,
        text: impl Into<String>,
    ) -> Self {
        Self {
            round,
            debater: debater.into(),
            kind,
            text: text.into(),
            error: None,
        }
    }

    /// Synthetic argument for a failed generation call
    pub fn degraded(
        round: u32,
        debater: impl Into<String>,
        kind: ArgumentKind,
        failure: impl std::fmt::Display,
    ) -> Self {
        let error = failure.to_string();
        Self {
            round,
            debater: debater.into(),
            kind,
            text: format!("Error generating argument: {}", error),
            error: Some(error),
        }
    }

    /// Placeholder for a debater slot missing after a parallel fan-out
    pub fn missing(round: u32, debater: impl Into<String>, slot: &str) -> Self {
        let text = format!("Error: Failed to generate argument {}", slot);
        Self {
            round,
            debater: debater.into(),
            kind: ArgumentKind::Opening,
            error: Some(text.clone()),
            text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_argument_carries_failure() {
        let arg = Argument::degraded(2, "A", ArgumentKind::Rebuttal, "connection refused");
        assert!(arg.is_degraded());
        assert_eq!(arg.text, "Error generating argument: connection refused");
        assert_eq!(arg.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_missing_placeholder() {
        let arg = Argument::missing(1, "Cautious Debater", "B");
        assert_eq!(arg.text, "Error: Failed to generate argument B");
        assert!(arg.is_degraded());
    }

    #[test]
    fn test_error_field_omitted_when_healthy() {
        let arg = Argument::new(1, "A", ArgumentKind::Opening, "text");
        let json = serde_json::to_value(&arg).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["kind"], "opening");
    }
}
