//! Scoring domain.
//!
//! Scores are extracted structurally from judge responses: each configured
//! dimension has a `<LABEL> SCORE: <number>` marker, and a response either
//! yields every dimension or is replaced by an explicit default.
//!
//! - [`dimension::ScoreDimension`]: a named dimension and its marker label
//! - [`score::Score`]: complete or defaulted per-dimension values
//! - [`grammar::ScoreGrammar`]: the tolerant marker scanner
//! - [`compliance::WordLimit`]: argument length check

pub mod compliance;
pub mod dimension;
pub mod grammar;
pub mod score;

pub use compliance::{WordCountCheck, WordLimit};
pub use dimension::ScoreDimension;
pub use grammar::{CompletenessPolicy, ScoreExtraction, ScoreGrammar, ScoreParseFailure};
pub use score::{DimensionScore, Score, ScoreStatus};
