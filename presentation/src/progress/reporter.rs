//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::ports::progress::DebateProgressNotifier;
use debate_domain::{Argument, EvaluationResult, Revision, Verdict};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per round
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn set_message(&self, message: String) {
        if let Ok(guard) = self.round_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.set_message(message);
        }
    }

    fn score_note(result: &EvaluationResult) -> String {
        if result.score.is_complete() {
            format!("mean {:.1}", result.score.mean())
        } else {
            "score defaulted".to_string()
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u32, parallel: bool) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message(if parallel {
            "Both debaters writing openings...".to_string()
        } else {
            "Writing rebuttals...".to_string()
        });
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.round_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_argument_generated(&self, argument: &Argument) {
        let mark = if argument.is_degraded() {
            "x".red()
        } else {
            "v".green()
        };
        self.set_message(format!(
            "{} {} wrote {} words, judging...",
            mark,
            argument.debater,
            argument.word_count()
        ));
    }

    fn on_evaluation_complete(&self, debater: &str, _round: u32, result: &EvaluationResult) {
        self.set_message(format!("{} judged ({})", debater, Self::score_note(result)));
    }

    fn on_revision_complete(&self, debater: &str, _round: u32, revision: &Revision) {
        self.set_message(format!(
            "{} revised ({})",
            debater,
            Self::score_note(&revision.evaluation)
        ));
    }

    fn on_round_complete(&self, round: u32) {
        if let Ok(mut guard) = self.round_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!("Round {} complete!", round).green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, topic: &str, rounds: u32) {
        println!("{} {} ({} rounds)", "->".cyan(), topic.bold(), rounds);
    }

    fn on_round_start(&self, round: u32, parallel: bool) {
        let note = if parallel { " (parallel openings)" } else { "" };
        println!("{} Round {}{}", "->".cyan(), round, note);
    }

    fn on_argument_generated(&self, argument: &Argument) {
        if argument.is_degraded() {
            println!("  {} {} (failed)", "x".red(), argument.debater);
        } else {
            println!("  {} {}", "v".green(), argument.debater);
        }
    }

    fn on_evaluation_complete(&self, debater: &str, _round: u32, result: &EvaluationResult) {
        println!(
            "    judged {}: {}",
            debater,
            ProgressReporter::score_note(result)
        );
    }

    fn on_revision_complete(&self, debater: &str, _round: u32, revision: &Revision) {
        println!(
            "    revised {}: {}",
            debater,
            ProgressReporter::score_note(&revision.evaluation)
        );
    }

    fn on_round_complete(&self, _round: u32) {
        println!();
    }

    fn on_verdict(&self, verdict: &Verdict) {
        println!("{} Verdict from {}", "->".cyan(), verdict.judge);
    }
}
