//! OpenAI-compatible chat-completions adapter.
//!
//! Gemini, Perplexity and OpenAI all expose `POST {base_url}/chat/completions`
//! with bearer authentication, so one adapter parameterized by
//! [`ProviderKind`] serves all three.

use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use debate_application::ports::llm_gateway::GatewayError;
use debate_domain::{Message, Model, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Characters of an error body kept in the failure message
const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatCompletionsAdapter {
    kind: ProviderKind,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionsAdapter {
    /// Create an adapter; `base_url` falls back to the provider's public endpoint
    pub fn new(kind: ProviderKind, api_key: impl Into<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| kind.default_base_url().to_string());
        Self {
            kind,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the request body: history in order, then the prompt as a user message
    pub(crate) fn build_request(&self, model: &Model, prompt: &str, history: &[Message]) -> ChatRequest {
        let mut messages: Vec<ChatMessage> = history
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str(),
                content: m.content.clone(),
            })
            .collect();

        if self.kind.requires_alternating_roles()
            && history.last().is_some_and(|m| m.role == Role::User)
        {
            messages.push(ChatMessage {
                role: Role::Assistant.as_str(),
                content: String::new(),
            });
        }

        messages.push(ChatMessage {
            role: Role::User.as_str(),
            content: prompt.to_string(),
        });

        ChatRequest {
            model: model.as_str().to_string(),
            messages,
        }
    }

    pub(crate) fn parse_response(body: &str) -> Result<String, GatewayError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::InvalidResponse(format!("malformed body: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("response has no message content".into()))
    }

    fn map_status(status: reqwest::StatusCode, model: &Model, body: &str) -> GatewayError {
        let body: String = body.chars().take(ERROR_BODY_CHARS).collect();
        match status.as_u16() {
            404 => GatewayError::ModelNotAvailable(format!("{} ({})", model, body)),
            _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, body)),
        }
    }

    fn map_transport(error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout
        } else if error.is_connect() {
            GatewayError::ConnectionError(error.to_string())
        } else {
            GatewayError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl ProviderAdapter for ChatCompletionsAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn supports_model(&self, model: &Model) -> bool {
        ProviderKind::for_family(model.family()) == Some(self.kind)
    }

    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError> {
        let request = self.build_request(model, prompt, history);
        debug!(
            "POST {} model={} messages={} prompt_chars={}",
            self.endpoint(),
            model,
            request.messages.len(),
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::map_transport)?;

        if !status.is_success() {
            let error = Self::map_status(status, model, &body);
            warn!("{} provider rejected request: {}", self.kind, error);
            return Err(error);
        }

        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(kind: ProviderKind) -> ChatCompletionsAdapter {
        ChatCompletionsAdapter::new(kind, "key", None)
    }

    fn roles(request: &ChatRequest) -> Vec<&str> {
        request.messages.iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(
            adapter(ProviderKind::Perplexity).endpoint(),
            "https://api.perplexity.ai/chat/completions"
        );
        let custom = ChatCompletionsAdapter::new(
            ProviderKind::OpenAi,
            "key",
            Some("http://localhost:8080/v1/".to_string()),
        );
        assert_eq!(custom.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_request_without_history_is_single_user_message() {
        let request = adapter(ProviderKind::Gemini).build_request(&Model::Gemini20Flash, "Hi", &[]);
        assert_eq!(request.model, "gemini-2.0-flash");
        assert_eq!(roles(&request), ["user"]);
        assert_eq!(request.messages[0].content, "Hi");
    }

    #[test]
    fn test_perplexity_inserts_assistant_after_trailing_user() {
        let history = vec![Message::system("persona"), Message::user("earlier question")];
        let request = adapter(ProviderKind::Perplexity).build_request(&Model::Sonar, "next", &history);
        assert_eq!(roles(&request), ["system", "user", "assistant", "user"]);
        assert_eq!(request.messages[2].content, "");
    }

    #[test]
    fn test_perplexity_keeps_alternating_history() {
        let history = vec![
            Message::system("persona"),
            Message::user("q"),
            Message::assistant("a"),
        ];
        let request = adapter(ProviderKind::Perplexity).build_request(&Model::Sonar, "next", &history);
        assert_eq!(roles(&request), ["system", "user", "assistant", "user"]);
    }

    #[test]
    fn test_other_providers_send_history_verbatim() {
        let history = vec![Message::user("q")];
        let request = adapter(ProviderKind::Gemini).build_request(&Model::Gemini20Flash, "next", &history);
        assert_eq!(roles(&request), ["user", "user"]);
    }

    #[test]
    fn test_request_serializes_to_chat_schema() {
        let request = adapter(ProviderKind::OpenAi).build_request(&Model::Gpt4Turbo, "Hi", &[]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hi");
    }

    #[test]
    fn test_parse_response_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#;
        assert_eq!(ChatCompletionsAdapter::parse_response(body).unwrap(), "Hello");
    }

    #[test]
    fn test_parse_response_rejects_empty_choices() {
        let err = ChatCompletionsAdapter::parse_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));

        let err = ChatCompletionsAdapter::parse_response("not json").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_status_mapping() {
        let err = ChatCompletionsAdapter::map_status(
            reqwest::StatusCode::NOT_FOUND,
            &Model::Sonar,
            "no such model",
        );
        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));

        let err = ChatCompletionsAdapter::map_status(
            reqwest::StatusCode::UNAUTHORIZED,
            &Model::Sonar,
            "bad key",
        );
        assert_eq!(
            err,
            GatewayError::RequestFailed("HTTP 401 Unauthorized: bad key".to_string())
        );
    }

    #[test]
    fn test_supports_model_by_family() {
        let gemini = adapter(ProviderKind::Gemini);
        assert!(gemini.supports_model(&Model::Gemini15Flash8b));
        assert!(!gemini.supports_model(&Model::SonarPro));
    }
}
