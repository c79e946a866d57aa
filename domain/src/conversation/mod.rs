//! Conversation domain.
//!
//! - [`entities::Message`]: a single message within a conversation
//! - [`history::ConversationHistory`]: a debater's bounded running history

pub mod entities;
pub mod history;

pub use entities::{Message, Role};
pub use history::{ConversationHistory, HistoryPolicy};
