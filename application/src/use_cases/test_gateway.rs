//! Scripted gateway for use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use debate_domain::{Message, Model};
use std::sync::Mutex;
use std::time::Duration;

type Responder = dyn Fn(&str) -> Result<String, GatewayError> + Send + Sync;
type Delay = dyn Fn(&str) -> Duration + Send + Sync;

/// One recorded `generate` call
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub model: Model,
    pub prompt: String,
    pub history: Vec<Message>,
}

/// Gateway whose reply and latency are computed from the prompt.
///
/// Calls are recorded in the order they were issued, before any delay.
pub(crate) struct ScriptedGateway {
    responder: Box<Responder>,
    delay: Box<Delay>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    pub fn new(
        responder: impl Fn(&str) -> Result<String, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            delay: Box::new(|_| Duration::ZERO),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose prompt contains `needle`
    pub fn calls_containing(&self, needle: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.prompt.contains(needle))
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.clone(),
            prompt: prompt.to_string(),
            history: history.to_vec(),
        });
        let delay = (self.delay)(prompt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(prompt)
    }
}

/// Marker label and score a layer prompt asks for, by focus name
const LAYER_REPLIES: [(&str, &str, &str); 4] = [
    ("Logical Consistency", "LOGICAL CONSISTENCY", "7"),
    ("Rhetorical Effectiveness", "PERSUASIVE QUALITY", "6"),
    ("Factual Accuracy", "FACTUAL ACCURACY", "8"),
    ("Belief Impact", "BELIEF-SHIFT", "5"),
];

/// Judge reply for a strategic layer prompt, if `prompt` is one
pub(crate) fn layer_reply(prompt: &str) -> Option<String> {
    LAYER_REPLIES
        .iter()
        .find(|(focus, _, _)| prompt.contains(&format!("Analyze based on '{focus}'")))
        .map(|(focus, label, score)| {
            format!("{label} SCORE: {score}\n\nCRITIQUE (200 words):\n{focus} critique.")
        })
}

/// Judge reply for a combined evaluation prompt
pub(crate) fn combined_reply() -> String {
    "Solid overall.\n\nIMPORTANT: scores follow\n- LOGICAL CONSISTENCY SCORE: 7\n- PERSUASIVE QUALITY SCORE: 6\n- FACTUAL ACCURACY SCORE: 8\n- BELIEF-SHIFT SCORE: 5"
        .to_string()
}

pub(crate) fn is_layer_prompt(prompt: &str) -> bool {
    prompt.contains("Analyze based on '")
}

pub(crate) fn is_combined_prompt(prompt: &str) -> bool {
    prompt.contains("Provide a comprehensive evaluation")
}

pub(crate) fn is_verdict_prompt(prompt: &str) -> bool {
    prompt.contains("Your answer should just contain the winner's name")
}

pub(crate) fn is_improvement_prompt(prompt: &str) -> bool {
    prompt.contains("Please improve your argument")
}
