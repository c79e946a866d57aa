//! Original-versus-revision comparison for self-improving debates

use super::debater::DebaterSide;
use super::session::DebateSession;
use crate::scoring::score::DimensionScore;
use serde::{Deserialize, Serialize};

/// How one revision differs from the argument it replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEntry {
    pub debater: String,
    pub side: DebaterSide,
    pub round: u32,
    pub original_chars: usize,
    pub revised_chars: usize,
    /// Signed character difference (revised minus original)
    pub change: i64,
    /// `change` relative to the original length; 0 for an empty original
    pub change_pct: f64,
    /// Per-dimension `revised - original`, present only when both scores
    /// are complete
    pub score_deltas: Option<Vec<DimensionScore>>,
}

/// Summarise every revision in the session, side A first
pub fn improvement_summary(session: &DebateSession) -> Vec<ImprovementEntry> {
    let mut entries: Vec<ImprovementEntry> = session
        .turns()
        .iter()
        .filter_map(|turn| {
            let revision = turn.revision()?;
            let record = turn.record();
            let original_chars = record.argument.text.chars().count();
            let revised_chars = revision.argument.text.chars().count();
            let change = revised_chars as i64 - original_chars as i64;
            let change_pct = if original_chars > 0 {
                change as f64 / original_chars as f64 * 100.0
            } else {
                0.0
            };

            let before = &record.evaluation.score;
            let after = &revision.evaluation.score;
            let score_deltas = (before.is_complete() && after.is_complete()).then(|| {
                after
                    .entries()
                    .iter()
                    .map(|entry| DimensionScore {
                        key: entry.key.clone(),
                        value: entry.value - before.get(&entry.key).unwrap_or_default(),
                    })
                    .collect()
            });

            Some(ImprovementEntry {
                debater: record.debater.clone(),
                side: record.side,
                round: record.round,
                original_chars,
                revised_chars,
                change,
                change_pct,
                score_deltas,
            })
        })
        .collect();

    entries.sort_by_key(|e| (e.side, e.round));
    entries
}
