//! Progress notification port
//!
//! Defines the interface for reporting progress while a debate runs.

use debate_domain::{Argument, EvaluationResult, Revision, Verdict};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer. Every method defaults to
/// a no-op so implementors only override what they display.
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once before round 1
    fn on_debate_start(&self, _topic: &str, _rounds: u32) {}

    /// Called when a round starts; round 1 generates both openings in parallel
    fn on_round_start(&self, _round: u32, _parallel: bool) {}

    /// Called when a debater produced an argument (possibly degraded)
    fn on_argument_generated(&self, _argument: &Argument) {}

    /// Called when the judge finished evaluating an original argument
    fn on_evaluation_complete(&self, _debater: &str, _round: u32, _result: &EvaluationResult) {}

    /// Called when a revision has been generated and re-evaluated
    fn on_revision_complete(&self, _debater: &str, _round: u32, _revision: &Revision) {}

    /// Called when both turns of a round are recorded
    fn on_round_complete(&self, _round: u32) {}

    /// Called when the judge has declared a winner
    fn on_verdict(&self, _verdict: &Verdict) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {}
