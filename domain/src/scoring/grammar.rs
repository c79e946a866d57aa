//! Score marker grammar.
//!
//! A [`ScoreGrammar`] maps each [`ScoreDimension`] to its marker pattern
//! (`<LABEL> SCORE` followed by a number) and scans free-form responses for
//! them. Pure text matching, no I/O.
//!
//! # Scanning rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Marker match | Case-sensitive substring match of `<LABEL> SCORE` |
//! | Value | First numeric token after the marker on the same line |
//! | Direction | Last line first, so echoed template examples never win |
//! | Order | Markers may appear in any order, with any text in between |
//! | Termination | Stops as soon as every dimension has a value |
//! | Completeness | [`CompletenessPolicy`]: all dimensions, or the default for all |

use super::dimension::ScoreDimension;
use super::score::Score;
use crate::core::error::DomainError;
use std::collections::HashMap;
use thiserror::Error;

/// Why a response did not yield a complete score
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreParseFailure {
    #[error("missing score markers for: {}", .missing.join(", "))]
    MissingDimensions { missing: Vec<String> },

    #[error("no text to scan for score markers")]
    EmptyResponse,
}

/// The all-or-default completeness rule.
///
/// When any configured dimension is missing, the partial extraction is
/// discarded and every dimension is set to `default_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletenessPolicy {
    pub default_value: f64,
}

impl CompletenessPolicy {
    /// All dimensions found, or all dimensions zero
    pub const ALL_OR_ZERO: CompletenessPolicy = CompletenessPolicy { default_value: 0.0 };
}

impl Default for CompletenessPolicy {
    fn default() -> Self {
        Self::ALL_OR_ZERO
    }
}

/// Result of applying the grammar and its completeness policy
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreExtraction {
    pub score: Score,
    /// Set when the policy replaced the score with the default
    pub failure: Option<ScoreParseFailure>,
}

impl ScoreExtraction {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Declarative mapping from dimension to marker, plus the completeness policy.
#[derive(Debug, Clone)]
pub struct ScoreGrammar {
    dimensions: Vec<ScoreDimension>,
    markers: Vec<String>,
    policy: CompletenessPolicy,
}

impl ScoreGrammar {
    pub fn new(
        dimensions: Vec<ScoreDimension>,
        policy: CompletenessPolicy,
    ) -> Result<Self, DomainError> {
        if dimensions.is_empty() {
            return Err(DomainError::NoDimensions);
        }
        Ok(Self::build(dimensions, policy))
    }

    /// Grammar over the four built-in dimensions with the all-or-zero policy
    pub fn standard() -> Self {
        Self::build(ScoreDimension::standard(), CompletenessPolicy::ALL_OR_ZERO)
    }

    fn build(dimensions: Vec<ScoreDimension>, policy: CompletenessPolicy) -> Self {
        let markers = dimensions.iter().map(ScoreDimension::marker).collect();
        Self {
            dimensions,
            markers,
            policy,
        }
    }

    pub fn dimensions(&self) -> &[ScoreDimension] {
        &self.dimensions
    }

    pub fn policy(&self) -> CompletenessPolicy {
        self.policy
    }

    /// Scan one response for every configured dimension.
    pub fn scan(&self, text: &str) -> Result<Score, ScoreParseFailure> {
        if text.trim().is_empty() {
            return Err(ScoreParseFailure::EmptyResponse);
        }
        let wanted: Vec<usize> = (0..self.dimensions.len()).collect();
        let found = self.scan_for(text, &wanted);
        self.assemble(found)
    }

    /// Scan several responses, each only for the dimension it is keyed to.
    ///
    /// Used when every layer answers in its own response: a layer's text can
    /// only ever supply that layer's dimension. Sections with unknown keys are
    /// ignored.
    pub fn scan_sections<'a>(
        &self,
        sections: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Score, ScoreParseFailure> {
        let mut found = HashMap::new();
        for (key, text) in sections {
            let Some(idx) = self.dimensions.iter().position(|d| d.key == key) else {
                continue;
            };
            found.extend(self.scan_for(text, &[idx]));
        }
        self.assemble(found)
    }

    /// [`Self::scan`] with the completeness policy applied
    pub fn extract(&self, text: &str) -> ScoreExtraction {
        self.apply_policy(self.scan(text))
    }

    /// [`Self::scan_sections`] with the completeness policy applied
    pub fn extract_sections<'a>(
        &self,
        sections: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> ScoreExtraction {
        self.apply_policy(self.scan_sections(sections))
    }

    /// The score the policy substitutes for a failed extraction
    pub fn default_score(&self, reason: impl Into<String>) -> Score {
        Score::defaulted(&self.dimensions, self.policy.default_value, reason)
    }

    fn apply_policy(&self, scanned: Result<Score, ScoreParseFailure>) -> ScoreExtraction {
        match scanned {
            Ok(score) => ScoreExtraction {
                score,
                failure: None,
            },
            Err(failure) => ScoreExtraction {
                score: self.default_score(failure.to_string()),
                failure: Some(failure),
            },
        }
    }

    fn scan_for(&self, text: &str, wanted: &[usize]) -> HashMap<usize, f64> {
        let mut found = HashMap::new();
        for line in text.lines().rev() {
            for &idx in wanted {
                if found.contains_key(&idx) {
                    continue;
                }
                let marker = &self.markers[idx];
                if let Some(pos) = line.find(marker.as_str())
                    && let Some(value) = first_number(&line[pos + marker.len()..])
                {
                    found.insert(idx, value);
                }
            }
            if found.len() == wanted.len() {
                break;
            }
        }
        found
    }

    fn assemble(&self, found: HashMap<usize, f64>) -> Result<Score, ScoreParseFailure> {
        let missing: Vec<String> = self
            .dimensions
            .iter()
            .enumerate()
            .filter(|(idx, _)| !found.contains_key(idx))
            .map(|(_, d)| d.key.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ScoreParseFailure::MissingDimensions { missing });
        }
        Ok(Score::complete(
            self.dimensions
                .iter()
                .enumerate()
                .map(|(idx, d)| (d.key.clone(), found[&idx])),
        ))
    }
}

/// First `[-+]?\d*\.?\d+` token in `s`.
fn first_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    for start in 0..bytes.len() {
        let mut cursor = start;
        if matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let int_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        let int_end = cursor;
        let mut end = int_end;
        if cursor < bytes.len() && bytes[cursor] == b'.' {
            let frac_start = cursor + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if frac_end > frac_start {
                end = frac_end;
            }
        }
        if end > int_start && (int_end > int_start || end > int_end) {
            return s[start..end].parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== first_number Tests ====================

    #[test]
    fn test_first_number_variants() {
        assert_eq!(first_number(": 8"), Some(8.0));
        assert_eq!(first_number(": 7.5/10"), Some(7.5));
        assert_eq!(first_number(":**9**"), Some(9.0));
        assert_eq!(first_number(" -2"), Some(-2.0));
        assert_eq!(first_number(" .5"), Some(0.5));
        assert_eq!(first_number(": [score]"), None);
        assert_eq!(first_number("スコア：6"), Some(6.0));
    }

    // ==================== scan Tests ====================

    #[test]
    fn test_all_markers_any_order_with_noise() {
        let response = r#"
Overall a solid effort.
- BELIEF-SHIFT SCORE: 6
Some interleaved commentary about evidence.
- FACTUAL ACCURACY SCORE: 7.5
More text.
LOGICAL CONSISTENCY SCORE: 9
The rhetoric was strong.
PERSUASIVE QUALITY SCORE: 8/10
"#;
        let extraction = ScoreGrammar::standard().extract(response);
        assert!(extraction.is_complete());
        let score = extraction.score;
        assert_eq!(score.get("logic"), Some(9.0));
        assert_eq!(score.get("persuasive"), Some(8.0));
        assert_eq!(score.get("factual"), Some(7.5));
        assert_eq!(score.get("belief"), Some(6.0));
        // Entries follow configured order, not response order.
        let keys: Vec<_> = score.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["logic", "persuasive", "factual", "belief"]);
    }

    #[test]
    fn test_missing_marker_defaults_everything() {
        let response = "LOGICAL CONSISTENCY SCORE: 9\nPERSUASIVE QUALITY SCORE: 8\nFACTUAL ACCURACY SCORE: 7";
        let extraction = ScoreGrammar::standard().extract(response);

        assert_eq!(
            extraction.failure,
            Some(ScoreParseFailure::MissingDimensions {
                missing: vec!["belief".to_string()]
            })
        );
        // Never a 3-of-4 partial mapping.
        assert!(!extraction.score.is_complete());
        assert_eq!(extraction.score.entries().len(), 4);
        assert!(extraction.score.entries().iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let response = "logical consistency score: 9";
        let grammar = ScoreGrammar::new(vec![ScoreDimension::logic()], CompletenessPolicy::ALL_OR_ZERO)
            .unwrap();
        assert!(!grammar.extract(response).is_complete());
    }

    #[test]
    fn test_marker_without_number_is_skipped() {
        let grammar = ScoreGrammar::new(vec![ScoreDimension::logic()], CompletenessPolicy::ALL_OR_ZERO)
            .unwrap();
        let response = "LOGICAL CONSISTENCY SCORE: 4\nLOGICAL CONSISTENCY SCORE: [score]";
        assert_eq!(grammar.extract(response).score.get("logic"), Some(4.0));
    }

    #[test]
    fn test_final_scores_beat_echoed_example() {
        let grammar = ScoreGrammar::new(vec![ScoreDimension::logic()], CompletenessPolicy::ALL_OR_ZERO)
            .unwrap();
        let response = "For example:\nLOGICAL CONSISTENCY SCORE: 8\n\nMy verdict:\nLOGICAL CONSISTENCY SCORE: 3";
        assert_eq!(grammar.extract(response).score.get("logic"), Some(3.0));
    }

    #[test]
    fn test_empty_response() {
        let extraction = ScoreGrammar::standard().extract("   ");
        assert_eq!(extraction.failure, Some(ScoreParseFailure::EmptyResponse));
        assert!(extraction.score.entries().iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_custom_default_value() {
        let grammar = ScoreGrammar::new(
            vec![ScoreDimension::logic()],
            CompletenessPolicy { default_value: 5.0 },
        )
        .unwrap();
        assert_eq!(grammar.extract("nothing").score.get("logic"), Some(5.0));
    }

    #[test]
    fn test_requires_dimensions() {
        assert_eq!(
            ScoreGrammar::new(vec![], CompletenessPolicy::ALL_OR_ZERO).unwrap_err(),
            DomainError::NoDimensions
        );
    }

    #[test]
    fn test_standard_matches_explicit_construction() {
        let explicit =
            ScoreGrammar::new(ScoreDimension::standard(), CompletenessPolicy::ALL_OR_ZERO)
                .unwrap();
        let standard = ScoreGrammar::standard();
        assert_eq!(standard.dimensions(), explicit.dimensions());
        assert_eq!(standard.policy(), explicit.policy());
        assert_eq!(standard.markers, explicit.markers);

        let text = "BELIEF-SHIFT SCORE: 4\nFACTUAL ACCURACY SCORE: 8\n\
                    PERSUASIVE QUALITY SCORE: 6\nLOGICAL CONSISTENCY SCORE: 7";
        assert_eq!(standard.scan(text).unwrap(), explicit.scan(text).unwrap());
    }

    // ==================== scan_sections Tests ====================

    #[test]
    fn test_sections_only_supply_their_own_dimension() {
        let grammar = ScoreGrammar::standard();
        // The logic section mentions every marker; only its own counts.
        let logic = "LOGICAL CONSISTENCY SCORE: 7\nPERSUASIVE QUALITY SCORE: 10\nFACTUAL ACCURACY SCORE: 10\nBELIEF-SHIFT SCORE: 10";
        let extraction = grammar.extract_sections([
            ("logic", logic),
            ("persuasive", "PERSUASIVE QUALITY SCORE: 6"),
            ("factual", "Error generating analysis: timeout"),
            ("belief", "BELIEF-SHIFT SCORE: 5"),
        ]);

        assert_eq!(
            extraction.failure,
            Some(ScoreParseFailure::MissingDimensions {
                missing: vec!["factual".to_string()]
            })
        );
        assert!(extraction.score.entries().iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_sections_complete() {
        let grammar = ScoreGrammar::standard();
        let extraction = grammar.extract_sections([
            ("belief", "BELIEF-SHIFT SCORE: 5"),
            ("logic", "LOGICAL CONSISTENCY SCORE: 7"),
            ("factual", "FACTUAL ACCURACY SCORE: 4"),
            ("persuasive", "PERSUASIVE QUALITY SCORE: 6"),
        ]);
        assert!(extraction.is_complete());
        assert_eq!(extraction.score.get("factual"), Some(4.0));
        assert_eq!(extraction.score.total(), 22.0);
    }
}
