//! Evaluation domain.
//!
//! - [`layer::EvaluationLayer`]: one judging perspective and its template
//! - [`result::EvaluationResult`]: feedback, score and per-layer critiques

pub mod layer;
pub mod result;

pub use layer::EvaluationLayer;
pub use result::{EvaluationMode, EvaluationResult, LayerCritique};
