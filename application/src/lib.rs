//! Application layer for debate-arena
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateParams, EvaluatorConfig};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GenerationFailure, LlmGateway},
    progress::{DebateProgressNotifier, NoProgress},
};
pub use use_cases::fan_out::{FanOut, fan_out};
pub use use_cases::run_debate::{
    Debater, Evaluator, IncompleteRoundData, RunDebateError, RunDebateInput, RunDebateUseCase,
};
pub use use_cases::shared::GenerationGuard;
