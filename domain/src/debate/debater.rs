//! Debater identity

use crate::core::model::Model;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// Which of the two seats a debater occupies.
///
/// Side A always speaks first within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DebaterSide {
    A,
    B,
}

impl DebaterSide {
    pub fn label(&self) -> &'static str {
        match self {
            DebaterSide::A => "A",
            DebaterSide::B => "B",
        }
    }

    pub fn opponent(&self) -> DebaterSide {
        match self {
            DebaterSide::A => DebaterSide::B,
            DebaterSide::B => DebaterSide::A,
        }
    }
}

impl std::fmt::Display for DebaterSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identity of a debater (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebaterProfile {
    pub name: String,
    pub model: Model,
    pub stance: String,
    /// Persona description, used as the system prompt
    pub persona: String,
}

impl DebaterProfile {
    pub fn new(
        name: impl Into<String>,
        model: Model,
        stance: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            stance: stance.into(),
            persona: persona.into(),
        }
    }

    /// Persona system message that seeds the debater's history
    pub fn system_message(&self) -> String {
        PromptTemplate::debater_system(&self.persona, &self.stance)
    }
}
