//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known LLM models (Value Object)
///
/// Debaters and the judge each name the model that generates their text.
/// Unknown identifiers are kept verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Gemini models
    Gemini20Flash,
    Gemini20FlashLite,
    Gemini15Flash8b,
    // Perplexity models
    Sonar,
    SonarPro,
    // GPT models
    Gpt4Turbo,
    // Custom
    Custom(String),
}

/// Model family, used to pick a provider when no explicit route exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    Gemini,
    Perplexity,
    Gpt,
    Unknown,
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Gemini15Flash8b => "gemini-1.5-flash-8b",
            Model::Sonar => "sonar",
            Model::SonarPro => "sonar-pro",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Custom(s) => s,
        }
    }

    /// Infer the model family from the identifier.
    ///
    /// Custom identifiers are classified by prefix, so `gemini-exp-1206`
    /// still routes to the Gemini provider.
    pub fn family(&self) -> ModelFamily {
        let id = self.as_str();
        if id.starts_with("gemini") {
            ModelFamily::Gemini
        } else if id.starts_with("sonar") {
            ModelFamily::Perplexity
        } else if id.starts_with("gpt") || id.starts_with("o1") || id.starts_with("o3") {
            ModelFamily::Gpt
        } else {
            ModelFamily::Unknown
        }
    }

    pub fn is_gemini(&self) -> bool {
        self.family() == ModelFamily::Gemini
    }

    pub fn is_perplexity(&self) -> bool {
        self.family() == ModelFamily::Perplexity
    }

    pub fn is_gpt(&self) -> bool {
        self.family() == ModelFamily::Gpt
    }

    /// Default model for debaters
    pub fn default_debater() -> Model {
        Model::Gemini20FlashLite
    }

    /// Default model for the judge
    pub fn default_judge() -> Model {
        Model::Sonar
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::default_debater()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            "gemini-1.5-flash-8b" => Model::Gemini15Flash8b,
            "sonar" => Model::Sonar,
            "sonar-pro" => Model::SonarPro,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(infallible) => match infallible {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let models = [
            Model::Gemini20Flash,
            Model::Gemini20FlashLite,
            Model::Gemini15Flash8b,
            Model::Sonar,
            Model::SonarPro,
            Model::Gpt4Turbo,
        ];
        for model in models {
            let parsed = Model::from(model.to_string().as_str());
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model = Model::from("gemini-2.0-flash-thinking-exp-01-21");
        assert_eq!(
            model,
            Model::Custom("gemini-2.0-flash-thinking-exp-01-21".to_string())
        );
        assert!(model.is_gemini());
    }

    #[test]
    fn test_model_family_detection() {
        assert!(Model::Sonar.is_perplexity());
        assert!(Model::SonarPro.is_perplexity());
        assert!(Model::Gemini15Flash8b.is_gemini());
        assert!(Model::Gpt4Turbo.is_gpt());
        assert_eq!(Model::from("llama-3").family(), ModelFamily::Unknown);
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::SonarPro).unwrap();
        assert_eq!(json, "\"sonar-pro\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::SonarPro);
    }
}
