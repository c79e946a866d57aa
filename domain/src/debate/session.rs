//! Debate session: round state machine and the append-only turn log

use super::argument::Argument;
use super::debater::{DebaterProfile, DebaterSide};
use super::turn::Turn;
use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::core::topic::Topic;
use serde::{Deserialize, Serialize};

/// Where the debate currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "round", rename_all = "snake_case")]
pub enum RoundState {
    AwaitingRound(u32),
    Concluded,
}

/// The judge's final holistic decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub judge: String,
    pub model: Model,
    /// Winner name as declared by the judge, or the failure text
    pub outcome: String,
    /// The judgment call failed
    pub degraded: bool,
}

/// A full debate between two debaters (Entity)
///
/// Turns are appended in generation order: within each round side A's turn
/// precedes side B's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateSession {
    topic: Topic,
    debater_a: DebaterProfile,
    debater_b: DebaterProfile,
    rounds: u32,
    self_improvement: bool,
    state: RoundState,
    turns: Vec<Turn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
}

impl DebateSession {
    pub fn new(
        topic: impl Into<String>,
        debater_a: DebaterProfile,
        debater_b: DebaterProfile,
        rounds: u32,
        self_improvement: bool,
    ) -> Result<Self, DomainError> {
        let topic = Topic::try_new(topic).ok_or(DomainError::EmptyTopic)?;
        if rounds == 0 {
            return Err(DomainError::InvalidRoundCount);
        }
        if debater_a.name == debater_b.name {
            return Err(DomainError::DuplicateDebaterName(debater_a.name));
        }

        Ok(Self {
            topic,
            debater_a,
            debater_b,
            rounds,
            self_improvement,
            state: RoundState::AwaitingRound(1),
            turns: Vec::with_capacity(rounds as usize * 2),
            verdict: None,
        })
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn debater(&self, side: DebaterSide) -> &DebaterProfile {
        match side {
            DebaterSide::A => &self.debater_a,
            DebaterSide::B => &self.debater_b,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn self_improvement(&self) -> bool {
        self.self_improvement
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_concluded(&self) -> bool {
        self.state == RoundState::Concluded
    }

    pub fn current_round(&self) -> Option<u32> {
        match self.state {
            RoundState::AwaitingRound(n) => Some(n),
            RoundState::Concluded => None,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Append a turn for the current round.
    ///
    /// The turn must match the session mode and arrive in A-then-B order.
    pub fn record_turn(&mut self, turn: Turn) -> Result<(), DomainError> {
        let round = self.current_round().ok_or_else(|| {
            DomainError::SessionState("cannot record a turn after the debate concluded".into())
        })?;
        if turn.round() != round {
            return Err(DomainError::SessionState(format!(
                "turn for round {} recorded while awaiting round {}",
                turn.round(),
                round
            )));
        }
        if turn.is_self_improving() != self.self_improvement {
            return Err(DomainError::SessionState(format!(
                "turn mode does not match session (self_improvement = {})",
                self.self_improvement
            )));
        }

        let expected = match self.turns_in_round(round) {
            0 => DebaterSide::A,
            1 => DebaterSide::B,
            _ => {
                return Err(DomainError::SessionState(format!(
                    "round {} already has both turns",
                    round
                )));
            }
        };
        if turn.side() != expected {
            return Err(DomainError::SessionState(format!(
                "expected debater {} to speak next in round {}",
                expected, round
            )));
        }
        if turn.debater() != self.debater(expected).name {
            return Err(DomainError::SessionState(format!(
                "turn debater '{}' does not occupy side {}",
                turn.debater(),
                expected
            )));
        }

        self.turns.push(turn);
        Ok(())
    }

    /// Close the current round once both turns are in
    pub fn complete_round(&mut self) -> Result<RoundState, DomainError> {
        let round = self.current_round().ok_or_else(|| {
            DomainError::SessionState("debate already concluded".into())
        })?;
        if self.turns_in_round(round) != 2 {
            return Err(DomainError::SessionState(format!(
                "round {} is missing a turn",
                round
            )));
        }

        self.state = if round < self.rounds {
            RoundState::AwaitingRound(round + 1)
        } else {
            RoundState::Concluded
        };
        Ok(self.state)
    }

    pub fn set_verdict(&mut self, verdict: Verdict) -> Result<(), DomainError> {
        if !self.is_concluded() {
            return Err(DomainError::SessionState(
                "a verdict requires a concluded debate".into(),
            ));
        }
        self.verdict = Some(verdict);
        Ok(())
    }

    pub fn turn(&self, round: u32, side: DebaterSide) -> Option<&Turn> {
        self.turns
            .iter()
            .find(|t| t.round() == round && t.side() == side)
    }

    /// Most recent argument by a side (its revision when self-improving)
    pub fn latest_argument(&self, side: DebaterSide) -> Option<&Argument> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.side() == side)
            .map(Turn::latest_argument)
    }

    /// Number of base turns, one per debater per round
    pub fn base_turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn revision_count(&self) -> usize {
        self.turns.iter().filter(|t| t.revision().is_some()).count()
    }

    fn turns_in_round(&self, round: u32) -> usize {
        self.turns.iter().filter(|t| t.round() == round).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::argument::ArgumentKind;
    use crate::debate::turn::{Revision, TurnRecord};
    use crate::evaluation::result::{EvaluationMode, EvaluationResult};
    use crate::scoring::compliance::WordLimit;
    use crate::scoring::grammar::ScoreGrammar;

    fn profile(name: &str) -> DebaterProfile {
        DebaterProfile::new(name, Model::default_debater(), "stance", "persona")
    }

    fn session(rounds: u32, self_improvement: bool) -> DebateSession {
        DebateSession::new("Topic", profile("Alpha"), profile("Beta"), rounds, self_improvement)
            .unwrap()
    }

    fn evaluation() -> EvaluationResult {
        EvaluationResult {
            feedback: String::new(),
            score: ScoreGrammar::standard().default_score("test"),
            word_count: WordLimit::default().check(""),
            mode: EvaluationMode::StrategicLayers,
            critiques: vec![],
        }
    }

    fn record(round: u32, side: DebaterSide) -> TurnRecord {
        let name = match side {
            DebaterSide::A => "Alpha",
            DebaterSide::B => "Beta",
        };
        TurnRecord {
            round,
            side,
            debater: name.to_string(),
            argument: Argument::new(round, name, ArgumentKind::Rebuttal, format!("{name} r{round}")),
            evaluation: evaluation(),
        }
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_rejects_invalid_input() {
        assert_eq!(
            DebateSession::new("  ", profile("A"), profile("B"), 1, false).unwrap_err(),
            DomainError::EmptyTopic
        );
        assert_eq!(
            DebateSession::new("T", profile("A"), profile("B"), 0, false).unwrap_err(),
            DomainError::InvalidRoundCount
        );
        assert_eq!(
            DebateSession::new("T", profile("A"), profile("A"), 1, false).unwrap_err(),
            DomainError::DuplicateDebaterName("A".to_string())
        );
    }

    // ==================== State Machine Tests ====================

    #[test]
    fn test_rounds_advance_to_concluded() {
        let mut s = session(2, false);
        assert_eq!(s.state(), RoundState::AwaitingRound(1));

        s.record_turn(Turn::Standard(record(1, DebaterSide::A))).unwrap();
        s.record_turn(Turn::Standard(record(1, DebaterSide::B))).unwrap();
        assert_eq!(s.complete_round().unwrap(), RoundState::AwaitingRound(2));

        s.record_turn(Turn::Standard(record(2, DebaterSide::A))).unwrap();
        s.record_turn(Turn::Standard(record(2, DebaterSide::B))).unwrap();
        assert_eq!(s.complete_round().unwrap(), RoundState::Concluded);

        assert_eq!(s.base_turn_count(), 4);
        assert!(s.record_turn(Turn::Standard(record(3, DebaterSide::A))).is_err());
    }

    #[test]
    fn test_side_b_cannot_speak_first() {
        let mut s = session(1, false);
        assert!(s.record_turn(Turn::Standard(record(1, DebaterSide::B))).is_err());
    }

    #[test]
    fn test_wrong_round_rejected() {
        let mut s = session(2, false);
        assert!(s.record_turn(Turn::Standard(record(2, DebaterSide::A))).is_err());
    }

    #[test]
    fn test_incomplete_round_cannot_close() {
        let mut s = session(1, false);
        s.record_turn(Turn::Standard(record(1, DebaterSide::A))).unwrap();
        assert!(s.complete_round().is_err());
    }

    #[test]
    fn test_mode_mismatch_rejected() {
        let mut s = session(1, true);
        assert!(s.record_turn(Turn::Standard(record(1, DebaterSide::A))).is_err());
    }

    #[test]
    fn test_verdict_requires_conclusion() {
        let mut s = session(1, false);
        let verdict = Verdict {
            judge: "Judge".to_string(),
            model: Model::default_judge(),
            outcome: "Alpha".to_string(),
            degraded: false,
        };
        assert!(s.set_verdict(verdict.clone()).is_err());

        s.record_turn(Turn::Standard(record(1, DebaterSide::A))).unwrap();
        s.record_turn(Turn::Standard(record(1, DebaterSide::B))).unwrap();
        s.complete_round().unwrap();
        s.set_verdict(verdict).unwrap();
        assert_eq!(s.verdict().unwrap().outcome, "Alpha");
    }

    // ==================== Query Tests ====================

    #[test]
    fn test_latest_argument_uses_revision() {
        let mut s = session(1, true);
        let revised = Argument::new(1, "Alpha", ArgumentKind::Revision, "Alpha revised");
        s.record_turn(Turn::SelfImproving {
            record: record(1, DebaterSide::A),
            revision: Revision {
                argument: revised.clone(),
                evaluation: evaluation(),
            },
        })
        .unwrap();

        assert_eq!(s.latest_argument(DebaterSide::A), Some(&revised));
        assert!(s.latest_argument(DebaterSide::B).is_none());
        assert_eq!(s.revision_count(), 1);
        assert_eq!(
            s.turn(1, DebaterSide::A).unwrap().record().argument.text,
            "Alpha r1"
        );
    }

    #[test]
    fn test_session_serializes() {
        let mut s = session(1, false);
        s.record_turn(Turn::Standard(record(1, DebaterSide::A))).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["topic"], "Topic");
        assert_eq!(json["state"]["state"], "awaiting_round");
        assert_eq!(json["turns"][0]["mode"], "standard");

        let back: DebateSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
