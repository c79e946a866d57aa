//! Application-level configuration.
//!
//! Static parameters that control how the debate use case behaves:
//!
//! - [`DebateParams`]: round count, self-improvement, word limit, history window, timeouts
//! - [`EvaluatorConfig`]: judge identity, evaluation mode, layers and worker bound

pub mod debate_params;
pub mod evaluator_config;

pub use debate_params::DebateParams;
pub use evaluator_config::EvaluatorConfig;
