//! @ai:module:intent Grade submitted answers against the ground truth
//! @ai:module:layer application
//! @ai:module:public_api Evaluator, AnswerMatcher, TemporalChecker, RubricGuide, Normalizer

pub mod matcher;
pub mod normalize;
pub mod rubric_guide;
pub mod temporal;

pub use matcher::{AnswerMatcher, AnswerMatcherTrait, MatchOutcome, MatchRule};
pub use normalize::Normalizer;
pub use rubric_guide::{RubricGuide, ScoreBand};
pub use temporal::{DocumentRecall, TemporalChecker};

use crate::config::{FilterConfig, ScoringConfig};
use crate::dataset::{GroundTruth, Question, QuestionCategory, Submissions};
use crate::metrics::{
    AutoScoredResult, EvaluationResults, HumanReviewItem, NotAnsweredItem, SummaryAggregator,
    SummaryAggregatorTrait, TemporalResult, NOT_ANSWERED,
};
use std::collections::HashSet;

/// Category label used for rubric-graded questions in review lists.
pub const QUALITATIVE_LABEL: &str = "qualitative";

/// Characters of question text kept in auto-scored records.
const QUESTION_PREVIEW_CHARS: usize = 80;

/// @ai:intent Routes every question to auto-scoring, temporal recall, human review or not-answered
pub struct Evaluator {
    matcher: AnswerMatcher,
    temporal: TemporalChecker,
    aggregator: SummaryAggregator,
    config: ScoringConfig,
    filter: FilterConfig,
}

impl Evaluator {
    /// @ai:intent Create an evaluator with the given scoring thresholds
    /// @ai:effects pure
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            matcher: AnswerMatcher::new(config.clone()),
            temporal: TemporalChecker::new(config.temporal_pass_recall),
            aggregator: SummaryAggregator::new(),
            config,
            filter: FilterConfig::default(),
        }
    }

    /// @ai:intent Restrict evaluation to questions accepted by the filter
    /// @ai:effects pure
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// @ai:intent Evaluate all submissions and compute the summary
    /// @ai:effects pure
    pub fn evaluate(&self, ground_truth: &GroundTruth, submissions: &Submissions) -> EvaluationResults {
        let mut results = EvaluationResults {
            timestamp: chrono::Utc::now().to_rfc3339(),
            ..Default::default()
        };

        for category in QuestionCategory::EXACT_MATCH_STYLE {
            for question in self.selected(ground_truth, category) {
                self.evaluate_exact(category, question, submissions, &mut results);
            }
        }

        for question in self.selected(ground_truth, QuestionCategory::QualitativeQuestions) {
            results.human_review.push(HumanReviewItem {
                id: question.id.clone(),
                category: QUALITATIVE_LABEL.to_string(),
                question: question.display_text().to_string(),
                rubric_id: question.rubric_id.clone(),
                reference_answer: None,
                submitted: submitted_or_placeholder(submissions, &question.id),
            });
        }

        for question in self.selected(ground_truth, QuestionCategory::NegativeQuestions) {
            self.evaluate_negative(question, submissions, &mut results);
        }

        for question in self.selected(ground_truth, QuestionCategory::TemporalFilterQuestions) {
            self.evaluate_temporal(question, submissions, &mut results);
        }

        let unknown = Self::unknown_submissions(ground_truth, submissions);
        if !unknown.is_empty() {
            tracing::warn!(
                "{} submitted ids are not in the ground truth: {}",
                unknown.len(),
                unknown.join(", ")
            );
        }

        results.summary = self.aggregator.summarize(
            &results.auto_scored,
            &results.temporal,
            &results.human_review,
            &results.not_answered,
        );

        tracing::info!(
            "Evaluated {} submissions: {} auto-scored, {} temporal, {} for review, {} not answered",
            submissions.len(),
            results.auto_scored.len(),
            results.temporal.len(),
            results.human_review.len(),
            results.not_answered.len()
        );

        results
    }

    /// @ai:intent Submitted ids that match no ground-truth question, sorted by id
    /// @ai:effects pure
    pub fn unknown_submissions(ground_truth: &GroundTruth, submissions: &Submissions) -> Vec<String> {
        let known: HashSet<&str> = ground_truth.iter().map(|(_, q)| q.id.as_str()).collect();
        submissions
            .ids()
            .filter(|id| !known.contains(id))
            .map(str::to_string)
            .collect()
    }

    fn selected<'a>(
        &'a self,
        ground_truth: &'a GroundTruth,
        category: QuestionCategory,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        ground_truth
            .questions(category)
            .iter()
            .filter(move |q| self.filter.matches(category.as_str(), &q.id))
    }

    /// @ai:intent Score a short factual answer; long references go to human review
    /// @ai:effects pure
    fn evaluate_exact(
        &self,
        category: QuestionCategory,
        question: &Question,
        submissions: &Submissions,
        results: &mut EvaluationResults,
    ) {
        let expected = question.expected();

        if expected.chars().count() > self.config.auto_score_max_length {
            results.human_review.push(HumanReviewItem {
                id: question.id.clone(),
                category: category.as_str().to_string(),
                question: question.display_text().to_string(),
                rubric_id: None,
                reference_answer: Some(expected.to_string()),
                submitted: submitted_or_placeholder(submissions, &question.id),
            });
            return;
        }

        let Some(submitted) = submissions.answer(&question.id) else {
            results.not_answered.push(not_answered(category, question));
            return;
        };

        let outcome = self
            .matcher
            .check_exact_match(&submitted, expected, &question.answer_variants);

        tracing::debug!(
            "{} scored {} by {}",
            question.id,
            outcome.score,
            outcome.rule.as_str()
        );

        results.auto_scored.push(AutoScoredResult {
            id: question.id.clone(),
            category: category.as_str().to_string(),
            question: question_preview(question),
            expected: expected.to_string(),
            submitted,
            variants: question.answer_variants.clone(),
            score: outcome.score,
            matched_by: outcome.rule,
        });
    }

    /// @ai:intent Award full credit when the answer says the information does not exist
    /// @ai:effects pure
    fn evaluate_negative(
        &self,
        question: &Question,
        submissions: &Submissions,
        results: &mut EvaluationResults,
    ) {
        let category = QuestionCategory::NegativeQuestions;
        let Some(submitted) = submissions.answer(&question.id) else {
            results.not_answered.push(not_answered(category, question));
            return;
        };

        let is_correct = self.matcher.check_negative(&submitted);
        let (score, rule) = if is_correct {
            (matcher::FULL_CREDIT, MatchRule::NotFound)
        } else {
            (matcher::NO_CREDIT, MatchRule::Unmatched)
        };

        results.auto_scored.push(AutoScoredResult {
            id: question.id.clone(),
            category: category.as_str().to_string(),
            question: question_preview(question),
            expected: format!(
                "[Should indicate: {}]",
                question.expected_behavior.as_deref().unwrap_or("")
            ),
            submitted,
            variants: Vec::new(),
            score,
            matched_by: rule,
        });
    }

    /// @ai:intent Measure document-id recall of a temporal filter answer
    /// @ai:effects pure
    fn evaluate_temporal(
        &self,
        question: &Question,
        submissions: &Submissions,
        results: &mut EvaluationResults,
    ) {
        let Some(submitted) = submissions.answer(&question.id) else {
            results
                .not_answered
                .push(not_answered(QuestionCategory::TemporalFilterQuestions, question));
            return;
        };

        let recall = self
            .temporal
            .check(&submitted, &question.expected_document_ids);

        results.temporal.push(TemporalResult {
            id: question.id.clone(),
            question: question_preview(question),
            submitted,
            recall,
        });
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

fn submitted_or_placeholder(submissions: &Submissions, question_id: &str) -> String {
    submissions
        .answer(question_id)
        .unwrap_or_else(|| NOT_ANSWERED.to_string())
}

fn not_answered(category: QuestionCategory, question: &Question) -> NotAnsweredItem {
    NotAnsweredItem {
        id: question.id.clone(),
        category: category.as_str().to_string(),
        question: question.display_text().to_string(),
    }
}

/// @ai:intent First 80 characters of the question text followed by "..."
/// @ai:effects pure
fn question_preview(question: &Question) -> String {
    let preview: String = question
        .display_text()
        .chars()
        .take(QUESTION_PREVIEW_CHARS)
        .collect();
    format!("{}...", preview)
}
