//! Debate domain.
//!
//! - [`debater::DebaterProfile`]: identity, stance and persona of a debater
//! - [`argument::Argument`]: immutable text from one generation call
//! - [`turn::Turn`]: one logged unit per debater per round
//! - [`session::DebateSession`]: round state machine and append-only log
//! - [`analysis::ImprovementEntry`]: original-vs-revision comparison

pub mod analysis;
pub mod argument;
pub mod debater;
pub mod session;
pub mod turn;

pub use analysis::{ImprovementEntry, improvement_summary};
pub use argument::{Argument, ArgumentKind};
pub use debater::{DebaterProfile, DebaterSide};
pub use session::{DebateSession, RoundState, Verdict};
pub use turn::{Revision, Turn, TurnRecord};
