//! Infrastructure layer for debate-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider clients, model routing,
//! configuration file loading, the JSONL event log and transcript export.

pub mod config;
pub mod logging;
pub mod providers;
pub mod transcript;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileDebaterConfig,
    FileJudgeConfig, FileLoggingConfig, FileProvidersConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    ProviderAdapter, ProviderKind, chat_completions::ChatCompletionsAdapter,
    routing::RoutingGateway,
};
pub use transcript::{Transcript, TranscriptError, export_transcript};
