//! Judge configuration.

use debate_domain::{EvaluationLayer, EvaluationMode, Model, WordLimit};

/// How the judge evaluates arguments and declares the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    pub name: String,
    pub model: Model,
    pub mode: EvaluationMode,
    /// Layers in display order; each contributes one score dimension
    pub layers: Vec<EvaluationLayer>,
    /// Upper bound on concurrent layer calls in strategic mode
    pub max_workers: usize,
    /// Replaced by [`DebateParams::word_limit`](crate::DebateParams) when the
    /// judge runs inside a debate
    pub word_limit: WordLimit,
    /// Characters of each argument quoted in the verdict summary
    pub verdict_excerpt_chars: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            name: "Judge".to_string(),
            model: Model::default_judge(),
            mode: EvaluationMode::StrategicLayers,
            layers: EvaluationLayer::standard(),
            max_workers: 4,
            word_limit: WordLimit::default(),
            verdict_excerpt_chars: 100,
        }
    }
}

impl EvaluatorConfig {
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn single_prompt(self) -> Self {
        self.with_mode(EvaluationMode::SinglePrompt)
    }

    pub fn with_layers(mut self, layers: Vec<EvaluationLayer>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_word_limit(mut self, limit: WordLimit) -> Self {
        self.word_limit = limit;
        self
    }

    /// Concurrent layer calls actually allowed: `min(max_workers, layers)`, at least 1
    pub fn effective_workers(&self) -> usize {
        self.max_workers.min(self.layers.len()).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strategic_with_four_layers() {
        let config = EvaluatorConfig::default();
        assert_eq!(config.mode, EvaluationMode::StrategicLayers);
        assert_eq!(config.layers.len(), 4);
        assert_eq!(config.effective_workers(), 4);
        assert_eq!(config.model, Model::Sonar);
    }

    #[test]
    fn test_effective_workers_bounded_by_layers() {
        let config = EvaluatorConfig::default()
            .with_max_workers(16)
            .with_layers(vec![EvaluationLayer::factual_accuracy()]);
        assert_eq!(config.effective_workers(), 1);

        let config = EvaluatorConfig::default().with_max_workers(0);
        assert_eq!(config.effective_workers(), 1);
    }
}
