//! Bounded conversation history owned by a single debater.

use super::entities::{Message, Role};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Window and eviction settings for a [`ConversationHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPolicy {
    /// Maximum number of retained messages, including a pinned system message.
    /// Eviction drops whole exchanges, so an odd budget leaves one slot unused.
    pub window: usize,
    /// Keep the persona system message when older entries are evicted.
    pub pin_system: bool,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            window: 10,
            pin_system: true,
        }
    }
}

impl HistoryPolicy {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn without_pinned_system(mut self) -> Self {
        self.pin_system = false;
        self
    }
}

/// Ordered, bounded message history.
///
/// Oldest entries are evicted first once the window is exceeded. With
/// [`HistoryPolicy::pin_system`] the system message lives outside the
/// rolling buffer and always leads [`ConversationHistory::messages`];
/// without it, the system message is an ordinary entry and eventually falls
/// out of the window.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    policy: HistoryPolicy,
    pinned: Option<Message>,
    entries: VecDeque<Message>,
}

impl ConversationHistory {
    /// Create a history seeded with a system message.
    pub fn with_system(system: impl Into<String>, policy: HistoryPolicy) -> Self {
        let system = Message::system(system);
        let mut history = Self {
            policy,
            pinned: None,
            entries: VecDeque::new(),
        };
        if policy.pin_system {
            history.pinned = Some(system);
        } else {
            history.entries.push_back(system);
        }
        history.enforce_window();
        history
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// All retained messages in conversation order.
    pub fn messages(&self) -> Vec<Message> {
        self.pinned
            .iter()
            .chain(self.entries.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pinned.iter().count() + self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record one prompt/reply exchange and enforce the window.
    pub fn push_exchange(&mut self, prompt: impl Into<String>, reply: impl Into<String>) {
        self.entries.push_back(Message::user(prompt));
        self.entries.push_back(Message::assistant(reply));
        self.enforce_window();
    }

    fn enforce_window(&mut self) {
        let budget = self
            .policy
            .window
            .saturating_sub(self.pinned.iter().count());
        // Evict whole exchanges so the retained entries still open with a
        // user message.
        while self.entries.len() > budget {
            let Some(evicted) = self.entries.pop_front() else {
                break;
            };
            if evicted.role == Role::User
                && self.entries.front().is_some_and(|m| m.role == Role::Assistant)
            {
                self.entries.pop_front();
            }
        }
    }
}
