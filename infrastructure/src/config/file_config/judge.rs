//! Judge configuration from TOML (`[judge]` section)

use super::debate::FileDebateConfig;
use debate_application::EvaluatorConfig;
use debate_domain::{Model, WordLimit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    pub name: String,
    pub model: String,
    /// One call per evaluation layer instead of a single combined prompt
    pub strategic_layers: bool,
    /// Concurrent layer calls in strategic mode
    pub max_workers: usize,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        Self {
            name: "Balanced Judge".to_string(),
            model: Model::default_judge().to_string(),
            strategic_layers: true,
            max_workers: 4,
        }
    }
}

impl FileJudgeConfig {
    pub fn to_evaluator_config(&self, debate: &FileDebateConfig) -> EvaluatorConfig {
        let mut config = EvaluatorConfig::new(self.name.trim(), Model::from(self.model.trim()))
            .with_max_workers(self.max_workers)
            .with_word_limit(WordLimit(debate.word_limit));
        if !self.strategic_layers {
            config = config.single_prompt();
        }
        config.verdict_excerpt_chars = debate.verdict_excerpt_chars;
        config
    }
}
