//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use debate_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

/// A gateway error attributed to the model that was asked
#[derive(Error, Debug, Clone, PartialEq)]
#[error("generation failed for {model}: {cause}")]
pub struct GenerationFailure {
    pub model: Model,
    #[source]
    pub cause: GatewayError,
}

impl GenerationFailure {
    pub fn new(model: &Model, cause: GatewayError) -> Self {
        Self {
            model: model.clone(),
            cause,
        }
    }
}

/// Gateway for LLM communication
///
/// Stateless: every call carries the full history to send before `prompt`.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a reply to `prompt`, preceded by `history` in order
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError>;
}
