//! Prompt templates for the debate flow

use crate::evaluation::layer::EvaluationLayer;
use crate::scoring::compliance::WordLimit;

/// Context for one debater argument prompt
#[derive(Debug, Clone, Copy)]
pub struct ArgumentPromptContext<'a> {
    pub topic: &'a str,
    pub stance: &'a str,
    pub persona: &'a str,
    pub opponent_argument: Option<&'a str>,
    pub prior_feedback: Option<&'a str>,
    pub word_limit: WordLimit,
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Persona system message for a debater
    pub fn debater_system(persona: &str, stance: &str) -> String {
        format!("{} You are arguing for the '{}' stance.", persona, stance)
    }

    /// Prompt for an opening argument or a rebuttal.
    ///
    /// Sections appear in a fixed order: opponent text, then prior feedback,
    /// then the length directive.
    pub fn argument_prompt(ctx: &ArgumentPromptContext<'_>) -> String {
        let mut prompt = format!(
            "Debate Topic: {}\nYour Stance: {}\nYour role: {}\n",
            ctx.topic, ctx.stance, ctx.persona
        );

        match non_blank(ctx.opponent_argument) {
            Some(opponent) => {
                prompt.push_str(&format!(
                    "Your opponent just argued:\n'''{}'''\nPlease formulate your counter-argument or rebuttal.\n",
                    opponent
                ));
            }
            None => prompt.push_str("Please present your opening argument.\n"),
        }

        if let Some(feedback) = non_blank(ctx.prior_feedback) {
            prompt.push_str(&format!(
                "\nFeedback on your previous argument:\n'''{}'''\nPlease incorporate this feedback into your response.\n",
                feedback
            ));
        }

        prompt.push_str(&Self::length_directive(ctx.word_limit));
        prompt.push_str("\nGenerate your argument:");
        prompt
    }

    /// Prompt asking a debater to revise an argument using judge feedback
    pub fn improvement_prompt(original: &str, feedback: &str, word_limit: WordLimit) -> String {
        format!(
            r#"You previously made the following argument:
'''{}'''

You received this feedback:
'''{}'''

Please improve your argument based on the feedback. Strengthen your reasoning,
address the weaknesses the feedback identifies, and keep a clear structure.
Your improved argument must still be {} words or less.

Provide only the improved argument."#,
            original,
            feedback,
            word_limit.words()
        )
    }

    fn length_directive(word_limit: WordLimit) -> String {
        let words = word_limit.words();
        // 130 words per minute of speaking time
        let minutes = words.div_ceil(130);
        format!(
            "\nVery important: Your argument must be {} words or less (approximately {} minutes of speaking time). You will be penalised if you go over this limit.",
            words, minutes
        )
    }

    /// System prompt for the judge
    pub fn judge_system() -> &'static str {
        "You are an impartial debate judge."
    }

    /// Full prompt for one strategic layer
    pub fn layer_prompt(topic: &str, round: u32, focus: &str, rendered_layer: &str) -> String {
        format!(
            "{}\nDebate Topic: {}\nRound: {}\nAnalyze based on '{}':\n{}",
            Self::judge_system(),
            topic,
            round,
            focus,
            rendered_layer
        )
    }

    /// Header that precedes the per-layer sections of combined feedback
    pub fn feedback_header(debater: &str, round: u32, topic: &str, argument: &str) -> String {
        format!(
            "Feedback for {} on Round {} (Topic: {}):\nArgument:\n'''{}'''\n\nAnalysis:\n",
            debater, round, topic, argument
        )
    }

    /// One combined prompt covering every layer
    pub fn combined_evaluation_prompt(
        topic: &str,
        round: u32,
        debater: &str,
        argument: &str,
        layers: &[EvaluationLayer],
    ) -> String {
        let mut prompt = format!(
            "{}\nDebate Topic: {}\nRound: {}\nDebater: {}\nEvaluate the following argument:\n'''{}'''\n\nProvide a comprehensive evaluation covering these key areas:\n\n",
            Self::judge_system(),
            topic,
            round,
            debater,
            argument
        );

        for (i, layer) in layers.iter().enumerate() {
            prompt.push_str(&format!("{}) {}:\n", i + 1, layer.focus.to_uppercase()));
            for point in &layer.guidance {
                prompt.push_str(&format!("- {}\n", point));
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "Provide specific, constructive feedback that will help the debater improve their argument. Be balanced and fair in your assessment.\n\n",
        );
        prompt.push_str(
            "IMPORTANT: After your analysis, provide quantitative scores on a scale of 0-10 for the following categories, one per line:\n",
        );
        for layer in layers {
            prompt.push_str(&format!("- {}: [score]\n", layer.dimension.marker()));
        }
        prompt.push_str("For example:\n");
        for layer in layers {
            prompt.push_str(&format!("- {}: 7\n", layer.dimension.marker()));
        }
        prompt
    }

    /// Final holistic judgment over a debate summary
    pub fn verdict_prompt(topic: &str, summary: &str) -> String {
        format!(
            r#"{}
You have observed a debate on the topic: '{}'.
Here is a summary of the arguments:
{}

Based on the entire debate, consider which debater presented stronger arguments, better addressed counter-arguments, used evidence more effectively, and showed improvement based on feedback.
Your answer should just contain the winner's name. Do not include anything else."#,
            Self::judge_system(),
            topic,
            summary
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
