//! Domain layer for debate-arena
//!
//! This crate contains the core debate entities and value objects. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Two debaters argue opposing stances on a [`Topic`] for a fixed number of
//! rounds. Every argument becomes a [`Turn`] in the [`DebateSession`] log,
//! together with the judge's [`EvaluationResult`].
//!
//! ## Evaluation
//!
//! The judge scores each argument through independent
//! [`EvaluationLayer`]s. Scores are read back with a [`ScoreGrammar`],
//! which either extracts every dimension or defaults them all.

pub mod conversation;
pub mod core;
pub mod debate;
pub mod evaluation;
pub mod prompt;
pub mod scoring;

// Re-export commonly used types
pub use conversation::{ConversationHistory, HistoryPolicy, Message, Role};
pub use core::{
    error::DomainError,
    model::{Model, ModelFamily},
    string::{excerpt, word_count},
    topic::Topic,
};
pub use debate::{
    Argument, ArgumentKind, DebateSession, DebaterProfile, DebaterSide, ImprovementEntry,
    Revision, RoundState, Turn, TurnRecord, Verdict, improvement_summary,
};
pub use evaluation::{EvaluationLayer, EvaluationMode, EvaluationResult, LayerCritique};
pub use prompt::{ArgumentPromptContext, PromptTemplate};
pub use scoring::{
    CompletenessPolicy, DimensionScore, Score, ScoreDimension, ScoreExtraction, ScoreGrammar,
    ScoreParseFailure, ScoreStatus, WordCountCheck, WordLimit,
};
