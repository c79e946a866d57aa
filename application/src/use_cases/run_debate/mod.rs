//! Run Debate use case
//!
//! Orchestrates the round state machine:
//!
//! | Round | Generation | Opponent text | Prior feedback |
//! |-------|------------|---------------|----------------|
//! | 1     | A and B in parallel | none | none |
//! | 2..N, A | sequential | B's latest argument | A's previous-round feedback |
//! | 2..N, B | sequential | A's argument from this round | B's previous-round feedback |
//!
//! After each argument the judge evaluates it; with self-improvement the
//! debater then revises it from the feedback and the revision is evaluated
//! on its own.

mod debater;
mod evaluator;
mod types;

pub use debater::Debater;
pub use evaluator::Evaluator;
pub use types::{IncompleteRoundData, RunDebateError, RunDebateInput};

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::use_cases::fan_out::fan_out;
use crate::use_cases::shared::GenerationGuard;
use debate_domain::{
    Argument, DebateSession, DebaterSide, EvaluationResult, Revision, Turn, TurnRecord,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running a full debate
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    cancellation_token: Option<CancellationToken>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for RunDebateUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            cancellation_token: self.cancellation_token.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            cancellation_token: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Cancel every outstanding and future generation call through `token`
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateSession, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Returns `Err` only for input rejected before round 1. Once the debate
    /// starts every round runs, with failed calls degraded inline.
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateSession, RunDebateError> {
        let RunDebateInput {
            topic,
            debater_a,
            debater_b,
            params,
            judge,
        } = input;

        let mut session = DebateSession::new(
            topic,
            debater_a.clone(),
            debater_b.clone(),
            params.rounds,
            params.self_improvement,
        )?;
        let guard = GenerationGuard::new(params.timeout, self.cancellation_token.clone());
        // Debaters and judge share one word limit
        let judge = judge.with_word_limit(params.word_limit);
        let evaluator = Evaluator::new(self.gateway.clone(), judge, guard.clone())?;
        let mut a = Debater::new(
            self.gateway.clone(),
            debater_a,
            DebaterSide::A,
            &params,
            guard.clone(),
        );
        let mut b = Debater::new(self.gateway.clone(), debater_b, DebaterSide::B, &params, guard);
        let topic = session.topic().content().to_string();

        info!(
            "Starting debate '{}': {} vs {}, {} rounds{}",
            topic,
            a.name(),
            b.name(),
            params.rounds,
            if params.self_improvement {
                " with self-improvement"
            } else {
                ""
            }
        );
        self.conversation_logger.log(ConversationEvent::new(
            "debate_started",
            json!({
                "topic": topic,
                "debater_a": a.name(),
                "debater_b": b.name(),
                "rounds": params.rounds,
                "self_improvement": params.self_improvement,
                "evaluation_mode": evaluator.mode(),
                "judge": evaluator.name(),
            }),
        ));
        progress.on_debate_start(&topic, params.rounds);

        self.opening_round(&mut session, &mut a, &mut b, &evaluator, &topic, progress)
            .await?;
        for round in 2..=params.rounds {
            self.rebuttal_round(&mut session, &mut a, &mut b, &evaluator, &topic, round, progress)
                .await?;
        }

        if params.declare_winner {
            let verdict = evaluator.declare_winner(&topic, session.turns()).await;
            info!("Verdict from {}: {}", verdict.judge, verdict.outcome);
            progress.on_verdict(&verdict);
            self.conversation_logger.log(ConversationEvent::new(
                "debate_concluded",
                json!({
                    "turns": session.base_turn_count(),
                    "revisions": session.revision_count(),
                    "verdict": verdict.outcome,
                    "verdict_degraded": verdict.degraded,
                }),
            ));
            session.set_verdict(verdict).map_err(RunDebateError::Session)?;
        } else {
            self.conversation_logger.log(ConversationEvent::new(
                "debate_concluded",
                json!({
                    "turns": session.base_turn_count(),
                    "revisions": session.revision_count(),
                    "verdict": null,
                }),
            ));
        }

        Ok(session)
    }

    /// Round 1: both openings generated concurrently, then evaluated A then B
    async fn opening_round(
        &self,
        session: &mut DebateSession,
        a: &mut Debater<G>,
        b: &mut Debater<G>,
        evaluator: &Evaluator<G>,
        topic: &str,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        info!("Round 1: generating opening arguments in parallel");
        progress.on_round_start(1, true);

        let tasks = vec![
            (DebaterSide::A, a.generate_argument(topic, 1, None, None)),
            (DebaterSide::B, b.generate_argument(topic, 1, None, None)),
        ];
        let mut openings = fan_out(tasks, 2).await;
        debug!("Round 1 completion order: {:?}", openings.completion_order);

        for debater in [&*a, &*b] {
            let side = debater.side();
            let argument = openings.take(&side).unwrap_or_else(|| {
                warn!("{}", IncompleteRoundData(side));
                Argument::missing(1, debater.name(), side.label())
            });
            let turn = self
                .complete_turn(session.self_improvement(), debater, evaluator, topic, argument, progress)
                .await;
            session.record_turn(turn).map_err(RunDebateError::Session)?;
        }

        self.finish_round(session, 1, progress)
    }

    /// Rounds 2..N: A answers B's latest argument, then B answers A's
    #[allow(clippy::too_many_arguments)]
    async fn rebuttal_round(
        &self,
        session: &mut DebateSession,
        a: &mut Debater<G>,
        b: &mut Debater<G>,
        evaluator: &Evaluator<G>,
        topic: &str,
        round: u32,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        info!("Round {}", round);
        progress.on_round_start(round, false);

        for side in [DebaterSide::A, DebaterSide::B] {
            let debater = match side {
                DebaterSide::A => &mut *a,
                DebaterSide::B => &mut *b,
            };
            let opponent = session
                .latest_argument(side.opponent())
                .map(|argument| argument.text.clone());
            let prior_feedback = session
                .turn(round - 1, side)
                .map(|turn| turn.record().evaluation.feedback.clone());

            let argument = debater
                .generate_argument(topic, round, opponent.as_deref(), prior_feedback.as_deref())
                .await;
            let turn = self
                .complete_turn(session.self_improvement(), debater, evaluator, topic, argument, progress)
                .await;
            session.record_turn(turn).map_err(RunDebateError::Session)?;
        }

        self.finish_round(session, round, progress)
    }

    /// Evaluate an argument and, when self-improving, revise and re-evaluate it
    async fn complete_turn(
        &self,
        self_improvement: bool,
        debater: &Debater<G>,
        evaluator: &Evaluator<G>,
        topic: &str,
        argument: Argument,
        progress: &dyn DebateProgressNotifier,
    ) -> Turn {
        let round = argument.round;
        let name = debater.name().to_string();

        progress.on_argument_generated(&argument);
        self.log_argument("argument_generated", &argument);

        let evaluation = evaluator.evaluate(&argument.text, &name, topic, round).await;
        progress.on_evaluation_complete(&name, round, &evaluation);
        self.log_evaluation(&name, round, false, &evaluation);

        let record = TurnRecord {
            round,
            side: debater.side(),
            debater: name.clone(),
            argument,
            evaluation,
        };
        if !self_improvement {
            return Turn::Standard(record);
        }

        let revised = debater
            .improve_argument(round, &record.argument.text, &record.evaluation.feedback)
            .await;
        self.log_argument("argument_revised", &revised);
        let revised_evaluation = evaluator.evaluate(&revised.text, &name, topic, round).await;
        self.log_evaluation(&name, round, true, &revised_evaluation);

        let revision = Revision {
            argument: revised,
            evaluation: revised_evaluation,
        };
        progress.on_revision_complete(&name, round, &revision);
        Turn::SelfImproving { record, revision }
    }

    fn finish_round(
        &self,
        session: &mut DebateSession,
        round: u32,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let state = session.complete_round().map_err(RunDebateError::Session)?;
        debug!("Round {} complete, next state {:?}", round, state);
        progress.on_round_complete(round);
        self.conversation_logger.log(ConversationEvent::new(
            "round_completed",
            json!({ "round": round }),
        ));
        Ok(())
    }

    fn log_argument(&self, event_type: &'static str, argument: &Argument) {
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            json!({
                "round": argument.round,
                "debater": argument.debater,
                "kind": argument.kind,
                "words": argument.word_count(),
                "degraded": argument.is_degraded(),
                "text": argument.text,
            }),
        ));
    }

    fn log_evaluation(&self, debater: &str, round: u32, revision: bool, evaluation: &EvaluationResult) {
        self.conversation_logger.log(ConversationEvent::new(
            "argument_evaluated",
            json!({
                "round": round,
                "debater": debater,
                "revision": revision,
                "mode": evaluation.mode,
                "score": evaluation.score,
                "word_count": evaluation.word_count,
                "failed_layers": evaluation.failed_layers(),
            }),
        ));
    }
}
