//! Debate configuration from TOML (`[debate]` section)

use debate_application::DebateParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Topic used when none is given on the command line
    pub topic: Option<String>,
    pub rounds: u32,
    pub self_improvement: bool,
    pub declare_winner: bool,
    /// Target words per argument
    pub word_limit: usize,
    /// Messages each debater keeps besides its persona
    pub history_window: usize,
    /// Characters of each argument quoted to the judge for the verdict
    pub verdict_excerpt_chars: usize,
    /// Timeout in seconds for every generation call
    pub timeout_seconds: Option<u64>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            topic: None,
            rounds: 3,
            self_improvement: false,
            declare_winner: true,
            word_limit: 520,
            history_window: 10,
            verdict_excerpt_chars: 100,
            timeout_seconds: None,
        }
    }
}

impl FileDebateConfig {
    pub fn to_debate_params(&self) -> DebateParams {
        DebateParams::default()
            .with_rounds(self.rounds)
            .with_self_improvement(self.self_improvement)
            .with_declare_winner(self.declare_winner)
            .with_word_limit(self.word_limit)
            .with_history_window(self.history_window)
            .with_timeout(self.timeout_seconds.map(Duration::from_secs))
    }
}
