//! Port for structured debate event logging.
//!
//! Defines the [`ConversationLogger`] trait for recording debate events
//! (arguments, evaluations, revisions, the verdict) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the debate
//! transcript as it happens in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured debate event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp when writing.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "debate_started", "argument_evaluated").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging debate events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures never
/// interrupt a debate.
pub trait ConversationLogger: Send + Sync {
    /// Record a debate event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
