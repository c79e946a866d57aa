//! Debater agent: one seat in the debate with its own running history.

use crate::config::DebateParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::shared::GenerationGuard;
use debate_domain::{
    Argument, ArgumentKind, ArgumentPromptContext, ConversationHistory, DebaterProfile,
    DebaterSide, Message, PromptTemplate, WordLimit,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// A debater bound to a gateway.
///
/// The history is mutated only by [`Debater::generate_argument`], and only
/// after a successful call.
pub struct Debater<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    profile: DebaterProfile,
    side: DebaterSide,
    history: ConversationHistory,
    word_limit: WordLimit,
    guard: GenerationGuard,
}

impl<G: LlmGateway + 'static> Debater<G> {
    pub fn new(
        gateway: Arc<G>,
        profile: DebaterProfile,
        side: DebaterSide,
        params: &DebateParams,
        guard: GenerationGuard,
    ) -> Self {
        let history = ConversationHistory::with_system(profile.system_message(), params.history);
        Self {
            gateway,
            profile,
            side,
            history,
            word_limit: params.word_limit,
            guard,
        }
    }

    pub fn profile(&self) -> &DebaterProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn side(&self) -> DebaterSide {
        self.side
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Produce an opening argument (no opponent text) or a rebuttal.
    ///
    /// Never fails: a failed call yields a degraded argument and leaves the
    /// history untouched.
    pub async fn generate_argument(
        &mut self,
        topic: &str,
        round: u32,
        opponent_argument: Option<&str>,
        prior_feedback: Option<&str>,
    ) -> Argument {
        let kind = match opponent_argument {
            Some(text) if !text.trim().is_empty() => ArgumentKind::Rebuttal,
            _ => ArgumentKind::Opening,
        };
        let prompt = PromptTemplate::argument_prompt(&ArgumentPromptContext {
            topic,
            stance: &self.profile.stance,
            persona: &self.profile.persona,
            opponent_argument,
            prior_feedback,
            word_limit: self.word_limit,
        });
        let history = self.history.messages();
        debug!(
            "{} round {}: prompt {} chars, history {} messages",
            self.profile.name,
            round,
            prompt.len(),
            history.len()
        );

        match self
            .guard
            .generate(self.gateway.as_ref(), &self.profile.model, &prompt, &history)
            .await
        {
            Ok(reply) => {
                self.history.push_exchange(prompt, reply.clone());
                Argument::new(round, self.profile.name.clone(), kind, reply)
            }
            Err(failure) => {
                warn!(
                    "{} failed to generate round {} argument: {}",
                    self.profile.name, round, failure
                );
                Argument::degraded(round, self.profile.name.clone(), kind, failure)
            }
        }
    }

    /// Revise `original` using the judge's feedback.
    ///
    /// Runs in isolation with only the persona system message as history; the
    /// running history is neither read nor written.
    pub async fn improve_argument(&self, round: u32, original: &str, feedback: &str) -> Argument {
        let prompt = PromptTemplate::improvement_prompt(original, feedback, self.word_limit);
        let history = [Message::system(self.profile.system_message())];

        match self
            .guard
            .generate(self.gateway.as_ref(), &self.profile.model, &prompt, &history)
            .await
        {
            Ok(reply) => Argument::new(round, self.profile.name.clone(), ArgumentKind::Revision, reply),
            Err(failure) => {
                warn!(
                    "{} failed to revise round {} argument: {}",
                    self.profile.name, round, failure
                );
                Argument::degraded(round, self.profile.name.clone(), ArgumentKind::Revision, failure)
            }
        }
    }
}
