//! @ai:module:intent Score short factual answers and "not found" answers
//! @ai:module:layer application
//! @ai:module:public_api AnswerMatcher, AnswerMatcherTrait, MatchOutcome, MatchRule
//! @ai:module:stateless true

use crate::config::ScoringConfig;
use crate::evaluator::normalize::Normalizer;
use serde::{Deserialize, Serialize};

pub const FULL_CREDIT: f64 = 1.0;
pub const PARTIAL_CREDIT: f64 = 0.5;
pub const NO_CREDIT: f64 = 0.0;

/// @ai:intent Which comparison rule decided a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Normalized text equal to the reference answer
    Exact,
    /// Normalized text equal to an accepted variant
    Variant,
    /// Same number after stripping currency, units and separators
    Numeric,
    /// Same calendar date in a different format
    Date,
    /// Reference answer embedded in a longer answer
    Contained,
    /// Indicates missing information, for negative questions
    NotFound,
    Unmatched,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Exact => "exact",
            MatchRule::Variant => "variant",
            MatchRule::Numeric => "numeric",
            MatchRule::Date => "date",
            MatchRule::Contained => "contained",
            MatchRule::NotFound => "not_found",
            MatchRule::Unmatched => "unmatched",
        }
    }
}

/// @ai:intent Score of one answer: 1.0 full, 0.5 right fact in the wrong format, 0.0 wrong
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub score: f64,
    pub rule: MatchRule,
}

impl MatchOutcome {
    fn new(score: f64, rule: MatchRule) -> Self {
        Self { score, rule }
    }
}

/// @ai:intent Trait for answer matching
pub trait AnswerMatcherTrait: Send + Sync {
    /// @ai:intent Score a submitted answer against the reference answer and its variants
    fn check_exact_match(&self, submitted: &str, expected: &str, variants: &[String]) -> MatchOutcome;

    /// @ai:intent Decide whether an answer correctly says the information is unavailable
    fn check_negative(&self, submitted: &str) -> bool;
}

/// @ai:intent Tiered matcher over normalized text, numbers and dates
pub struct AnswerMatcher {
    normalizer: Normalizer,
    config: ScoringConfig,
}

impl AnswerMatcher {
    /// @ai:intent Create a matcher with the given thresholds
    /// @ai:effects pure
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            normalizer: Normalizer::new(),
            config,
        }
    }

    /// @ai:intent Compare two answers numerically with relative and absolute tolerance
    /// @ai:effects pure
    fn numbers_match(&self, submitted: &str, expected: &str) -> bool {
        match (self.normalizer.number(submitted), self.normalizer.number(expected)) {
            (Some(s), Some(e)) => {
                let tolerance = self
                    .config
                    .numeric_absolute_tolerance
                    .max(e.abs() * self.config.numeric_relative_tolerance);
                (s - e).abs() < tolerance
            }
            _ => false,
        }
    }

    /// @ai:intent Compare two answers as calendar dates
    /// @ai:effects pure
    fn dates_match(&self, submitted: &str, expected: &str) -> bool {
        match (self.normalizer.date(submitted), self.normalizer.date(expected)) {
            (Some(s), Some(e)) => s == e,
            _ => false,
        }
    }
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl AnswerMatcherTrait for AnswerMatcher {
    /// @ai:intent Apply the matching tiers in order: text, variants, number, date, containment
    /// @ai:effects pure
    fn check_exact_match(&self, submitted: &str, expected: &str, variants: &[String]) -> MatchOutcome {
        let submitted_norm = self.normalizer.text(submitted);
        let expected_norm = self.normalizer.text(expected);

        if submitted_norm == expected_norm {
            return MatchOutcome::new(FULL_CREDIT, MatchRule::Exact);
        }

        if variants
            .iter()
            .any(|variant| self.normalizer.text(variant) == submitted_norm)
        {
            return MatchOutcome::new(FULL_CREDIT, MatchRule::Variant);
        }

        if self.numbers_match(submitted, expected) {
            return MatchOutcome::new(PARTIAL_CREDIT, MatchRule::Numeric);
        }

        if self.dates_match(submitted, expected) {
            return MatchOutcome::new(PARTIAL_CREDIT, MatchRule::Date);
        }

        if expected_norm.chars().count() > self.config.min_containment_length
            && submitted_norm.contains(&expected_norm)
        {
            return MatchOutcome::new(PARTIAL_CREDIT, MatchRule::Contained);
        }

        MatchOutcome::new(NO_CREDIT, MatchRule::Unmatched)
    }

    /// @ai:intent Empty answers, "not found" phrases and short questions back count as negative
    /// @ai:effects pure
    fn check_negative(&self, submitted: &str) -> bool {
        if submitted.trim().is_empty() {
            return true;
        }

        let lowered = submitted.trim().to_lowercase();

        if self
            .config
            .negative_indicators
            .iter()
            .any(|indicator| lowered.contains(&indicator.to_lowercase()))
        {
            return true;
        }

        submitted.contains('?')
            && submitted.chars().count() < self.config.uncertain_answer_max_length
    }
}
