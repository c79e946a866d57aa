use super::chat_completions::ChatCompletionsAdapter;
use super::{ProviderAdapter, ProviderKind};
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, LlmGateway};
use debate_domain::{Message, Model};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Gateway that forwards each call to the provider serving its model.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model id → index into `providers`, from `[providers.routing]`
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &FileProvidersConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Some(target_kind) = ProviderKind::parse(provider_name) else {
                warn!(
                    "Ignoring route {} -> {}: unknown provider",
                    model_name, provider_name
                );
                continue;
            };

            match providers.iter().position(|p| p.kind() == target_kind) {
                Some(idx) => {
                    explicit_model_routing.insert(model_name.clone(), idx);
                }
                None => warn!(
                    "Ignoring route {} -> {}: provider has no credentials",
                    model_name, provider_name
                ),
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_kind: config.default_kind(),
        }
    }

    /// Register a chat-completions adapter for every provider with an API key
    pub fn from_config(config: &FileProvidersConfig) -> Self {
        let providers: Vec<Arc<dyn ProviderAdapter>> =
            [ProviderKind::Gemini, ProviderKind::Perplexity, ProviderKind::OpenAi]
                .into_iter()
                .filter_map(|kind| {
                    let endpoint = config.endpoint(kind);
                    let api_key = endpoint.api_key()?;
                    Some(Arc::new(ChatCompletionsAdapter::new(
                        kind,
                        api_key,
                        endpoint.base_url.clone(),
                    )) as Arc<dyn ProviderAdapter>)
                })
                .collect();

        if providers.is_empty() {
            warn!("No provider has an API key; every generation call will fail");
        }
        Self::new(providers, config)
    }

    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Routing priority:
    ///  1. `explicit_model_routing` entry for the model id
    ///  2. a provider that natively serves the model family
    ///  3. the provider matching `default_kind`
    ///  4. the first registered provider
    ///  5. no providers at all: `GatewayError::ModelNotAvailable`
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(p) = self.providers.iter().find(|p| p.supports_model(model)) {
            return Ok(p.as_ref());
        }

        if let Some(p) = self
            .providers
            .iter()
            .find(|p| p.kind() == self.default_kind)
        {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or(GatewayError::ModelNotAvailable(
                "No providers available".to_string(),
            ))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError> {
        let provider = self.resolve_provider(model)?;
        debug!("Routing {} to {}", model, provider.kind());
        provider.generate(model, prompt, history).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Mock ProviderAdapter --------------------------------------------------

    struct MockProvider {
        kind: ProviderKind,
    }

    impl MockProvider {
        fn new(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
            Arc::new(Self { kind })
        }
    }

    #[async_trait]
    impl ProviderAdapter for MockProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn supports_model(&self, model: &Model) -> bool {
            ProviderKind::for_family(model.family()) == Some(self.kind)
        }

        async fn generate(
            &self,
            model: &Model,
            _prompt: &str,
            history: &[Message],
        ) -> Result<String, GatewayError> {
            Ok(format!("{}:{}:{}", self.kind, model, history.len()))
        }
    }

    // -- Helpers ---------------------------------------------------------------

    fn default_config() -> FileProvidersConfig {
        FileProvidersConfig::default()
    }

    fn config_with_default(default: &str) -> FileProvidersConfig {
        FileProvidersConfig {
            default: Some(default.to_string()),
            ..Default::default()
        }
    }

    fn all_providers() -> Vec<Arc<dyn ProviderAdapter>> {
        vec![
            MockProvider::new(ProviderKind::Gemini),
            MockProvider::new(ProviderKind::Perplexity),
            MockProvider::new(ProviderKind::OpenAi),
        ]
    }

    // -- resolve_provider routing priority tests -------------------------------

    #[test]
    fn explicit_routing_takes_highest_priority() {
        // sonar would infer to Perplexity, but the explicit route wins.
        let mut routing = HashMap::new();
        routing.insert("sonar".to_string(), "openai".to_string());
        let config = FileProvidersConfig {
            routing,
            ..Default::default()
        };
        let gw = RoutingGateway::new(all_providers(), &config);

        let provider = gw.resolve_provider(&Model::Sonar).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn model_family_selects_native_provider() {
        let gw = RoutingGateway::new(all_providers(), &default_config());

        assert_eq!(
            gw.resolve_provider(&Model::Gemini20FlashLite).unwrap().kind(),
            ProviderKind::Gemini
        );
        assert_eq!(
            gw.resolve_provider(&Model::SonarPro).unwrap().kind(),
            ProviderKind::Perplexity
        );
        assert_eq!(
            gw.resolve_provider(&Model::Gpt4Turbo).unwrap().kind(),
            ProviderKind::OpenAi
        );
    }

    #[test]
    fn unknown_family_falls_back_to_default_kind() {
        let gw = RoutingGateway::new(all_providers(), &config_with_default("perplexity"));

        let provider = gw.resolve_provider(&Model::Custom("llama-3".into())).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Perplexity);
    }

    #[test]
    fn falls_back_to_first_provider_when_default_kind_unavailable() {
        // Default is Gemini but only OpenAI is registered.
        let providers = vec![MockProvider::new(ProviderKind::OpenAi)];
        let gw = RoutingGateway::new(providers, &config_with_default("gemini"));

        let provider = gw.resolve_provider(&Model::Sonar).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn empty_providers_returns_model_not_available() {
        let gw = RoutingGateway::new(vec![], &default_config());

        let result = gw.resolve_provider(&Model::Sonar);
        assert!(matches!(result, Err(GatewayError::ModelNotAvailable(_))));
    }

    #[test]
    fn unknown_or_unregistered_route_is_ignored() {
        let providers = vec![MockProvider::new(ProviderKind::Gemini)];
        let mut routing = HashMap::new();
        routing.insert("sonar".to_string(), "nonexistent-provider".to_string());
        routing.insert("gpt-4-turbo".to_string(), "openai".to_string());
        let config = FileProvidersConfig {
            routing,
            ..Default::default()
        };
        let gw = RoutingGateway::new(providers, &config);

        assert!(gw.explicit_model_routing.is_empty());
    }

    #[test]
    fn from_config_registers_only_providers_with_keys() {
        let mut config = default_config();
        config.perplexity.api_key = Some("p-key".to_string());
        config.openai.api_key = Some("".to_string());
        let gw = RoutingGateway::from_config(&config);

        assert_eq!(gw.provider_kinds(), [ProviderKind::Perplexity]);
    }

    // -- LlmGateway trait integration tests ------------------------------------

    #[tokio::test]
    async fn generate_forwards_to_resolved_provider() {
        let gw = RoutingGateway::new(all_providers(), &default_config());

        let reply = gw
            .generate(&Model::Sonar, "prompt", &[Message::system("persona")])
            .await
            .unwrap();
        assert_eq!(reply, "perplexity:sonar:1");
        assert_eq!(
            gw.provider_kinds(),
            [ProviderKind::Gemini, ProviderKind::Perplexity, ProviderKind::OpenAi]
        );
    }
}
