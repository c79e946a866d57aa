//! Debate parameters: round loop control.

use debate_domain::{HistoryPolicy, WordLimit};
use std::time::Duration;

/// Round loop control parameters.
///
/// Used by [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase)
/// and by each debater it creates.
#[derive(Debug, Clone, PartialEq)]
pub struct DebateParams {
    /// Number of rounds (at least 1)
    pub rounds: u32,
    /// Revise every argument with its feedback and re-evaluate the revision
    pub self_improvement: bool,
    /// Ask the judge for a winner after the last round
    pub declare_winner: bool,
    /// Target length of every argument
    pub word_limit: WordLimit,
    /// Debater conversation history window
    pub history: HistoryPolicy,
    /// Per-call timeout for every generation call
    pub timeout: Option<Duration>,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            rounds: 3,
            self_improvement: false,
            declare_winner: true,
            word_limit: WordLimit::default(),
            history: HistoryPolicy::default(),
            timeout: None,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_self_improvement(mut self, enabled: bool) -> Self {
        self.self_improvement = enabled;
        self
    }

    pub fn with_declare_winner(mut self, enabled: bool) -> Self {
        self.declare_winner = enabled;
        self
    }

    pub fn with_word_limit(mut self, words: usize) -> Self {
        self.word_limit = WordLimit(words);
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history = self.history.with_window(window);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
