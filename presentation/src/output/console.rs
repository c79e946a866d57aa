//! Console output formatter for debate results

use colored::Colorize;
use debate_domain::{
    Argument, ArgumentKind, DebateSession, DebaterSide, EvaluationResult, ImprovementEntry, Score,
    ScoreStatus, Turn, improvement_summary,
};

/// Formats a finished debate for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate, round by round
    pub fn format(session: &DebateSession) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Results"));
        output.push('\n');
        output.push_str(&Self::preamble(session));

        let mut current_round = 0;
        for turn in session.turns() {
            if turn.round() != current_round {
                current_round = turn.round();
                output.push_str(&Self::section_header(&format!("Round {}", current_round)));
            }
            output.push_str(&Self::format_turn(turn));
        }

        if session.self_improvement() {
            output.push_str(&Self::format_improvements(&improvement_summary(session)));
        }

        output.push_str(&Self::format_verdict(session));
        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(session: &DebateSession) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Score table and verdict only (concise output)
    pub fn format_summary(session: &DebateSession) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Debate Summary ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), session.topic()));

        for turn in session.turns() {
            let record = turn.record();
            output.push_str(&format!(
                "  R{} {} {:<24} {}\n",
                record.round,
                record.side,
                record.debater,
                Self::score_line(&record.evaluation.score)
            ));
            if let Some(revision) = turn.revision() {
                output.push_str(&format!(
                    "  R{} {} {:<24} {}\n",
                    record.round,
                    record.side,
                    "  (revised)",
                    Self::score_line(&revision.evaluation.score)
                ));
            }
        }

        output.push_str(&Self::format_verdict(session));
        output
    }

    /// Original-versus-revision comparison, one block per debater
    pub fn format_improvements(entries: &[ImprovementEntry]) -> String {
        let mut output = Self::section_header("Self-Improvement Analysis");
        if entries.is_empty() {
            output.push_str("\nNo revisions were recorded.\n");
            return output;
        }

        let mut current: Option<DebaterSide> = None;
        for entry in entries {
            if current != Some(entry.side) {
                current = Some(entry.side);
                output.push_str(&format!("\n{}\n", entry.debater.yellow().bold()));
            }
            output.push_str(&format!(
                "  Round {}: {} -> {} characters ({:+} chars, {:+.1}%)\n",
                entry.round, entry.original_chars, entry.revised_chars, entry.change, entry.change_pct
            ));
            match &entry.score_deltas {
                Some(deltas) => {
                    let line = deltas
                        .iter()
                        .map(|d| format!("{} {:+.1}", d.key, d.value))
                        .collect::<Vec<_>>()
                        .join(", ");
                    output.push_str(&format!("    Score change: {}\n", line));
                }
                None => output.push_str("    Score change: n/a (a score was defaulted)\n"),
            }
        }
        output
    }

    fn preamble(session: &DebateSession) -> String {
        let mut output = format!("{} {}\n", "Topic:".cyan().bold(), session.topic());
        for side in [DebaterSide::A, DebaterSide::B] {
            let profile = session.debater(side);
            output.push_str(&format!(
                "{} {} ({}): {}\n",
                format!("Debater {}:", side).cyan().bold(),
                profile.name,
                profile.model,
                profile.stance
            ));
        }
        let mode = if session.self_improvement() {
            "self-improving"
        } else {
            "standard"
        };
        output.push_str(&format!(
            "{} {} rounds, {}\n",
            "Format:".cyan().bold(),
            session.rounds(),
            mode
        ));
        output
    }

    fn format_turn(turn: &Turn) -> String {
        let record = turn.record();
        let mut output = Self::format_argument(&record.argument);
        output.push_str(&Self::format_evaluation(&record.evaluation));

        if let Some(revision) = turn.revision() {
            output.push_str(&Self::format_argument(&revision.argument));
            output.push_str(&Self::format_evaluation(&revision.evaluation));
        }
        output
    }

    fn format_argument(argument: &Argument) -> String {
        let kind = match argument.kind {
            ArgumentKind::Opening => "opening",
            ArgumentKind::Rebuttal => "rebuttal",
            ArgumentKind::Revision => "revision",
        };
        let title = format!("── {} ({}) ──", argument.debater, kind);
        let title = if argument.is_degraded() {
            title.red().bold()
        } else {
            title.yellow().bold()
        };
        format!("\n{}\n{}\n", title, argument.text)
    }

    fn format_evaluation(evaluation: &EvaluationResult) -> String {
        let mut output = format!(
            "\n{} {}\n",
            "Scores:".green().bold(),
            Self::score_line(&evaluation.score)
        );

        let words = &evaluation.word_count;
        let words_line = format!("{}/{} words", words.word_count, words.limit);
        output.push_str(&format!(
            "{} {}\n",
            "Length:".green().bold(),
            if words.compliant {
                words_line.normal()
            } else {
                words_line.red()
            }
        ));

        if evaluation.failed_layers() > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} layer(s) failed to respond", evaluation.failed_layers()).red()
            ));
        }

        output.push_str(&format!("{}\n", "Feedback:".green().bold()));
        output.push_str(&Self::indent(&evaluation.feedback, "  "));
        output.push('\n');
        output
    }

    fn format_verdict(session: &DebateSession) -> String {
        let Some(verdict) = session.verdict() else {
            return String::new();
        };
        let mut output = Self::section_header("Verdict");
        let judge = format!("{} ({})", verdict.judge, verdict.model);
        output.push_str(&format!("\n{}\n", judge.yellow().bold()));
        if verdict.degraded {
            output.push_str(&format!("{}\n", verdict.outcome.red()));
        } else {
            output.push_str(&format!("{}\n", verdict.outcome));
        }
        output
    }

    /// `logic 7.0 | persuasive 6.0 | ...`, or a note when the score was defaulted
    fn score_line(score: &Score) -> String {
        let values = score
            .entries()
            .iter()
            .map(|entry| format!("{} {:.1}", entry.key, entry.value))
            .collect::<Vec<_>>()
            .join(" | ");
        match score.status() {
            ScoreStatus::Complete => format!("{} (mean {:.2})", values, score.mean()),
            ScoreStatus::Defaulted { reason } => format!("{} [defaulted: {}]", values, reason),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
