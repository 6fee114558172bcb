//! @ai:module:intent Result records for an evaluation run
//! @ai:module:layer domain
//! @ai:module:public_api AutoScoredResult, HumanReviewItem, TemporalResult, NotAnsweredItem, Summary, CategoryScore, EvaluationResults
//! @ai:module:stateless true

use crate::dataset::RubricSet;
use crate::evaluator::matcher::MatchRule;
use crate::evaluator::temporal::DocumentRecall;
use serde::{Deserialize, Serialize};

/// Submission placeholder shown to graders for unanswered questions.
pub const NOT_ANSWERED: &str = "[NOT ANSWERED]";

/// @ai:intent One automatically scored answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoScoredResult {
    pub id: String,
    pub category: String,
    pub question: String,
    pub expected: String,
    pub submitted: String,
    #[serde(default)]
    pub variants: Vec<String>,
    pub score: f64,
    pub matched_by: MatchRule,
}

/// @ai:intent A question that needs a human (or LLM) judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanReviewItem {
    pub id: String,
    pub category: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_answer: Option<String>,
    pub submitted: String,
}

/// @ai:intent Document-recall result of a temporal filter question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalResult {
    pub id: String,
    pub question: String,
    pub submitted: String,
    #[serde(flatten)]
    pub recall: DocumentRecall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotAnsweredItem {
    pub id: String,
    pub category: String,
    pub question: String,
}

/// @ai:intent Auto-scored points of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    pub max_score: usize,
    pub percentage: f64,
}

/// @ai:intent Aggregate statistics of an evaluation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub auto_scored_total_score: f64,
    pub auto_scored_max_score: usize,
    pub auto_scored_percentage: f64,
    pub full_credit_count: usize,
    pub partial_credit_count: usize,
    pub wrong_count: usize,
    pub temporal_pass: usize,
    pub temporal_total: usize,
    pub human_review_count: usize,
    pub not_answered_count: usize,
    #[serde(default)]
    pub by_category: Vec<CategoryScore>,
}

impl Summary {
    /// @ai:intent Score line used on the terminal, e.g. "12.5/20 (62.5%)"
    /// @ai:effects pure
    pub fn score_line(&self) -> String {
        format!(
            "{}/{} ({:.1}%)",
            format_score(self.auto_scored_total_score),
            self.auto_scored_max_score,
            self.auto_scored_percentage
        )
    }
}

/// @ai:intent Complete output of an evaluation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub timestamp: String,
    pub auto_scored: Vec<AutoScoredResult>,
    pub human_review: Vec<HumanReviewItem>,
    pub temporal: Vec<TemporalResult>,
    pub not_answered: Vec<NotAnsweredItem>,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubrics: Option<RubricSet>,
}

impl EvaluationResults {
    /// @ai:intent Attach the rubric set used to render grading guides
    /// @ai:effects pure
    pub fn with_rubrics(mut self, rubrics: Option<RubricSet>) -> Self {
        self.rubrics = rubrics;
        self
    }
}

/// @ai:intent Render a half-point score with one decimal
/// @ai:effects pure
/// @ai:example (12.5) -> "12.5", (3.0) -> "3.0"
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}
