//! Debater configuration from TOML (`[debaters.a]` / `[debaters.b]`)

use debate_domain::{DebaterProfile, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebaterConfig {
    pub name: String,
    /// Model id, e.g. "gemini-2.0-flash-lite"
    pub model: String,
    pub stance: String,
    /// Persona description used as the debater's system prompt
    pub persona: String,
}

impl FileDebaterConfig {
    pub fn to_profile(&self) -> DebaterProfile {
        DebaterProfile::new(
            self.name.trim(),
            Model::from(self.model.trim()),
            &self.stance,
            &self.persona,
        )
    }

    fn side_a() -> Self {
        Self {
            name: "Policy Advocate".to_string(),
            model: Model::default_debater().to_string(),
            stance: "Social media platforms must be held legally accountable for the spread of harmful misinformation on their sites to protect democratic processes and public safety.".to_string(),
            persona: "You are a policy advocate arguing forcefully for regulations that hold social media platforms legally responsible for misinformation.".to_string(),
        }
    }

    fn side_b() -> Self {
        Self {
            name: "Free Speech Advocate".to_string(),
            model: Model::default_debater().to_string(),
            stance: "Holding social media platforms legally responsible for user-generated content stifles free speech, is technically unfeasible, and would turn platforms into censors.".to_string(),
            persona: "You are a free speech advocate arguing against holding social media platforms legally responsible for user content, emphasizing free expression and the practical limits of moderation.".to_string(),
        }
    }
}

impl Default for FileDebaterConfig {
    fn default() -> Self {
        Self::side_a()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebatersConfig {
    pub a: FileDebaterConfig,
    pub b: FileDebaterConfig,
}

impl Default for FileDebatersConfig {
    fn default() -> Self {
        Self {
            a: FileDebaterConfig::side_a(),
            b: FileDebaterConfig::side_b(),
        }
    }
}
