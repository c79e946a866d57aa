//! LLM provider adapters and model-based routing

pub mod chat_completions;
pub mod routing;

use async_trait::async_trait;
use debate_application::ports::llm_gateway::GatewayError;
use debate_domain::{Message, Model, ModelFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Perplexity,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Parse a provider name as written in `[providers]`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(ProviderKind::Gemini),
            "perplexity" | "sonar" => Some(ProviderKind::Perplexity),
            "openai" | "gpt" => Some(ProviderKind::OpenAi),
            _ => None,
        }
    }

    /// Provider that serves a model family natively
    pub fn for_family(family: ModelFamily) -> Option<Self> {
        match family {
            ModelFamily::Gemini => Some(ProviderKind::Gemini),
            ModelFamily::Perplexity => Some(ProviderKind::Perplexity),
            ModelFamily::Gpt => Some(ProviderKind::OpenAi),
            ModelFamily::Unknown => None,
        }
    }

    /// OpenAI-compatible endpoint root used when none is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            ProviderKind::Perplexity => "https://api.perplexity.ai",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Perplexity rejects two consecutive user messages
    pub fn requires_alternating_roles(&self) -> bool {
        matches!(self, ProviderKind::Perplexity)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    fn supports_model(&self, model: &Model) -> bool;
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_names() {
        assert_eq!(ProviderKind::parse("Gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse(" perplexity "), Some(ProviderKind::Perplexity));
        assert_eq!(ProviderKind::parse("openai"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("bedrock"), None);
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(
            ProviderKind::for_family(Model::Sonar.family()),
            Some(ProviderKind::Perplexity)
        );
        assert_eq!(
            ProviderKind::for_family(Model::Custom("llama-3".into()).family()),
            None
        );
    }
}
