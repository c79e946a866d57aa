//! Topic value object

use serde::{Deserialize, Serialize};

/// The proposition under debate (Value Object)
///
/// Guaranteed non-blank. Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Try to create a topic, returning None if it is blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the topic text
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_topic_rejected() {
        assert!(Topic::try_new("").is_none());
        assert!(Topic::try_new("   \n\t").is_none());
    }

    #[test]
    fn test_topic_is_trimmed() {
        let topic = Topic::try_new("  Is AI beneficial?  ").unwrap();
        assert_eq!(topic.content(), "Is AI beneficial?");
        assert_eq!(topic.to_string(), "Is AI beneficial?");
    }
}
