//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the guarded generation call used by
//! every debater and judge request.

use crate::ports::llm_gateway::{GatewayError, GenerationFailure, LlmGateway};
use debate_domain::{Message, Model};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(GatewayError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), GatewayError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(GatewayError::Cancelled);
    }
    Ok(())
}

/// Timeout and cancellation applied around each generation call.
///
/// Both conditions surface as ordinary [`GatewayError`] values, so callers
/// degrade them exactly like a transport failure.
#[derive(Debug, Clone, Default)]
pub struct GenerationGuard {
    timeout: Option<Duration>,
    cancellation_token: Option<CancellationToken>,
}

impl GenerationGuard {
    pub fn new(timeout: Option<Duration>, cancellation_token: Option<CancellationToken>) -> Self {
        Self {
            timeout,
            cancellation_token,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive `call` under the configured timeout and cancellation token
    pub async fn run<T, F>(&self, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        check_cancelled(&self.cancellation_token)?;

        let timed = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::Timeout),
                },
                None => call.await,
            }
        };

        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(GatewayError::Cancelled),
                    result = timed => result,
                }
            }
            None => timed.await,
        }
    }

    /// One guarded `generate` call, with the failure attributed to `model`
    pub async fn generate<G: LlmGateway + ?Sized>(
        &self,
        gateway: &G,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GenerationFailure> {
        self.run(gateway.generate(model, prompt, history))
            .await
            .map_err(|cause| GenerationFailure::new(model, cause))
    }
}
