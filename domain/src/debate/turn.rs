//! Turn entities

use super::argument::Argument;
use super::debater::DebaterSide;
use crate::evaluation::result::EvaluationResult;
use serde::{Deserialize, Serialize};

/// Fields shared by every turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub side: DebaterSide,
    pub debater: String,
    pub argument: Argument,
    pub evaluation: EvaluationResult,
}

/// A revised argument and its own evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub argument: Argument,
    pub evaluation: EvaluationResult,
}

/// One debater's contribution to one round.
///
/// The variant records the debate mode: self-improving turns always carry
/// the revision made after feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Turn {
    Standard(TurnRecord),
    SelfImproving {
        #[serde(flatten)]
        record: TurnRecord,
        revision: Revision,
    },
}

impl Turn {
    pub fn record(&self) -> &TurnRecord {
        match self {
            Turn::Standard(record) => record,
            Turn::SelfImproving { record, .. } => record,
        }
    }

    pub fn revision(&self) -> Option<&Revision> {
        match self {
            Turn::Standard(_) => None,
            Turn::SelfImproving { revision, .. } => Some(revision),
        }
    }

    pub fn round(&self) -> u32 {
        self.record().round
    }

    pub fn side(&self) -> DebaterSide {
        self.record().side
    }

    pub fn debater(&self) -> &str {
        &self.record().debater
    }

    pub fn is_self_improving(&self) -> bool {
        matches!(self, Turn::SelfImproving { .. })
    }

    /// The argument an opponent responds to: the revision when one exists
    pub fn latest_argument(&self) -> &Argument {
        match self {
            Turn::Standard(record) => &record.argument,
            Turn::SelfImproving { revision, .. } => &revision.argument,
        }
    }
}
