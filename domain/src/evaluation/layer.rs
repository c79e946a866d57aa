//! Evaluation layers.
//!
//! A layer is one independent judging perspective. It renders a prompt from
//! `{argument}`, `{stance}` and `{topic}` and instructs the judge to answer
//! with a `<LABEL> SCORE: <0-10>` line and a critique block.

use crate::core::error::DomainError;
use crate::prompt::render::{has_placeholder, render};
use crate::scoring::dimension::ScoreDimension;
use serde::{Deserialize, Serialize};

/// One scoring perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationLayer {
    /// Display name, e.g. "Rhetorical Effectiveness"
    pub focus: String,
    /// Dimension this layer scores; its label is the parse key
    pub dimension: ScoreDimension,
    /// Prompt template with `{argument}`, `{stance}`, `{topic}` placeholders
    pub template: String,
    /// Short checklist reused by the single-prompt evaluation
    #[serde(default)]
    pub guidance: Vec<String>,
}

impl EvaluationLayer {
    /// Substitute the argument, the debater label and the topic
    pub fn render(&self, argument: &str, debater_label: &str, topic: &str) -> String {
        render(
            &self.template,
            &[
                ("argument", argument),
                ("stance", debater_label),
                ("topic", topic),
            ],
        )
    }

    /// Check the template satisfies the critique format contract
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidLayer {
            focus: self.focus.clone(),
            reason: reason.to_string(),
        };
        if !has_placeholder(&self.template, "argument") {
            return Err(invalid("template has no {argument} placeholder"));
        }
        let marker = format!("{}:", self.dimension.marker());
        if !self.template.contains(&marker) {
            return Err(invalid(&format!("template never asks for '{marker}'")));
        }
        if !self.template.contains("CRITIQUE") {
            return Err(invalid("template never asks for a CRITIQUE block"));
        }
        Ok(())
    }

    /// Validate a whole layer set: each layer, and no dimension twice
    pub fn validate_all(layers: &[EvaluationLayer]) -> Result<(), DomainError> {
        if layers.is_empty() {
            return Err(DomainError::NoDimensions);
        }
        for (i, layer) in layers.iter().enumerate() {
            layer.validate()?;
            if layers[..i].iter().any(|l| l.dimension.key == layer.dimension.key) {
                return Err(DomainError::InvalidLayer {
                    focus: layer.focus.clone(),
                    reason: format!("dimension '{}' is scored twice", layer.dimension.key),
                });
            }
        }
        Ok(())
    }

    /// Dimensions of a layer set, in layer order
    pub fn dimensions(layers: &[EvaluationLayer]) -> Vec<ScoreDimension> {
        layers.iter().map(|l| l.dimension.clone()).collect()
    }

    /// The four built-in layers in display order
    pub fn standard() -> Vec<EvaluationLayer> {
        vec![
            Self::logical_consistency(),
            Self::rhetorical_effectiveness(),
            Self::factual_accuracy(),
            Self::belief_impact(),
        ]
    }

    pub fn logical_consistency() -> Self {
        Self {
            focus: "Logical Consistency".to_string(),
            dimension: ScoreDimension::logic(),
            template: r#"Your only concern is the logical structure of the debater's reasoning, not its factual correctness or its style.

Topic: "{topic}"
Debater: "{stance}"
Argument:
{argument}

Look for classical fallacies (ad hominem, straw man, false dichotomy, hasty generalisation), internal contradictions, premises that do not support their conclusions, and gaps in the progression from one point to the next.

Answer in exactly this format:

LOGICAL CONSISTENCY SCORE: [score from 0-10]
(0 = multiple severe logical breakdowns, 5 = mostly sound with minor flaws, 10 = impeccable structure)

CRITIQUE (200 words):
[200 words on the key logical strengths and weaknesses and how to fix them.]"#
                .to_string(),
            guidance: vec![
                "Identify logical fallacies".to_string(),
                "Check internal contradictions".to_string(),
                "Evaluate how premises connect to conclusions".to_string(),
            ],
        }
    }

    pub fn rhetorical_effectiveness() -> Self {
        Self {
            focus: "Rhetorical Effectiveness".to_string(),
            dimension: ScoreDimension::persuasive(),
            template: r#"Your only concern is how persuasively the debater communicates, not whether the content is true or strictly logical.

Topic: "{topic}"
Debater: "{stance}"
Argument:
{argument}

Consider the clarity of the central thesis, emotional appeal and audience engagement, word choice and tone, how counterarguments are anticipated, and the flow from opening to close.

Answer in exactly this format:

PERSUASIVE QUALITY SCORE: [score from 0-10]
(0 = thoroughly unconvincing, 5 = moderately effective, 10 = masterful rhetoric)

CRITIQUE (200 words):
[200 words on the strongest rhetorical devices and where structure or delivery falls short.]"#
                .to_string(),
            guidance: vec![
                "Assess clarity of the central thesis".to_string(),
                "Evaluate emotional appeal and engagement".to_string(),
                "Examine how counterarguments are addressed".to_string(),
            ],
        }
    }

    pub fn factual_accuracy() -> Self {
        Self {
            focus: "Factual Accuracy".to_string(),
            dimension: ScoreDimension::factual(),
            template: r#"Your only concern is the factual accuracy of the debater's claims.

The debater ({stance}) argued on the topic "{topic}":
{argument}

Check stated facts and figures against established knowledge, the credibility of any cited sources, whether major claims are backed by enough evidence, and whether facts are framed without cherry-picking or misleading context.

Answer in exactly this format:

FACTUAL ACCURACY SCORE: [score from 0-10]
(0 = pervasive inaccuracies, 5 = generally correct with notable gaps, 10 = meticulous and well supported)

CRITIQUE (200 words):
[200 words on the most important factual strengths, errors and missing evidence.]"#
                .to_string(),
            guidance: vec![
                "Verify claims against established knowledge".to_string(),
                "Evaluate source quality".to_string(),
                "Check for misleading framing".to_string(),
            ],
        }
    }

    pub fn belief_impact() -> Self {
        Self {
            focus: "Belief Impact".to_string(),
            dimension: ScoreDimension::belief(),
            template: r#"Your only concern is how likely this argument is to change what its audience believes.

Topic: "{topic}"
Debater: "{stance}"
Argument:
{argument}

Estimate the effect on listeners who start opposed, on undecided listeners, and on existing supporters, and note anything likely to alienate part of the audience.

Answer in exactly this format:

BELIEF-SHIFT SCORE: [score from 0-10]
(0 = no chance of changing minds, 5 = moderate impact on neutral listeners, 10 = likely to sway even opponents)

CRITIQUE (200 words):
[200 words on which audiences the argument reaches and how to widen that reach.]"#
                .to_string(),
            guidance: vec![
                "Estimate impact on opposing audiences".to_string(),
                "Analyse effect on undecided audiences".to_string(),
                "Identify elements that alienate listeners".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layers_are_valid() {
        EvaluationLayer::validate_all(&EvaluationLayer::standard()).unwrap();
    }

    #[test]
    fn test_standard_layer_order() {
        let focuses: Vec<_> = EvaluationLayer::standard()
            .into_iter()
            .map(|l| l.focus)
            .collect();
        assert_eq!(
            focuses,
            [
                "Logical Consistency",
                "Rhetorical Effectiveness",
                "Factual Accuracy",
                "Belief Impact"
            ]
        );
    }

    #[test]
    fn test_render_substitutes_fields() {
        let layer = EvaluationLayer::factual_accuracy();
        let prompt = layer.render("Coal is cheap.", "Debater A", "Energy policy");
        assert!(prompt.contains("The debater (Debater A) argued on the topic \"Energy policy\""));
        assert!(prompt.contains("Coal is cheap."));
        assert!(!prompt.contains("{argument}"));
    }

    #[test]
    fn test_missing_marker_rejected() {
        let mut layer = EvaluationLayer::logical_consistency();
        layer.template = "Judge {argument}. CRITIQUE please. SCORE: ?".to_string();
        let err = layer.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidLayer { .. }));
    }

    #[test]
    fn test_missing_argument_placeholder_rejected() {
        let mut layer = EvaluationLayer::belief_impact();
        layer.template = layer.template.replace("{argument}", "the argument");
        assert!(layer.validate().is_err());
    }

    #[test]
    fn test_duplicate_dimension_rejected() {
        let layers = vec![
            EvaluationLayer::logical_consistency(),
            EvaluationLayer::logical_consistency(),
        ];
        assert!(EvaluationLayer::validate_all(&layers).is_err());
    }
}
