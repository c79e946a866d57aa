//! Provider configuration from TOML (`[providers]` section)

use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credentials and endpoint of one OpenAI-compatible provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderEndpoint {
    /// API key; usually supplied through `DEBATE_PROVIDERS__<NAME>__API_KEY`
    pub api_key: Option<String>,
    /// Base URL override (without the `/chat/completions` suffix)
    pub base_url: Option<String>,
}

impl FileProviderEndpoint {
    /// A provider is usable once it has a non-empty key
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider used when a model matches no route and no family:
    /// "gemini", "perplexity" or "openai"
    pub default: Option<String>,
    /// Explicit model → provider name overrides
    pub routing: HashMap<String, String>,
    pub gemini: FileProviderEndpoint,
    pub perplexity: FileProviderEndpoint,
    pub openai: FileProviderEndpoint,
}

impl FileProvidersConfig {
    pub fn endpoint(&self, kind: ProviderKind) -> &FileProviderEndpoint {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Perplexity => &self.perplexity,
            ProviderKind::OpenAi => &self.openai,
        }
    }

    pub fn default_kind(&self) -> ProviderKind {
        self.default
            .as_deref()
            .and_then(ProviderKind::parse)
            .unwrap_or_default()
    }

    /// Every provider name mentioned by `default` or the routing table that
    /// is not a known provider
    pub fn unknown_provider_names(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .default
            .iter()
            .chain(self.routing.values())
            .filter(|name| ProviderKind::parse(name).is_none())
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}
