//! @ai:module:intent Summary statistics for an evaluation run
//! @ai:module:layer application
//! @ai:module:public_api SummaryAggregator, SummaryAggregatorTrait
//! @ai:module:stateless true

use crate::evaluator::matcher::{FULL_CREDIT, NO_CREDIT, PARTIAL_CREDIT};
use crate::metrics::types::{
    AutoScoredResult, CategoryScore, HumanReviewItem, NotAnsweredItem, Summary, TemporalResult,
};

/// @ai:intent Trait for summary aggregation
pub trait SummaryAggregatorTrait: Send + Sync {
    /// @ai:intent Summarize the record lists of a run
    fn summarize(
        &self,
        auto_scored: &[AutoScoredResult],
        temporal: &[TemporalResult],
        human_review: &[HumanReviewItem],
        not_answered: &[NotAnsweredItem],
    ) -> Summary;
}

/// @ai:intent Computes totals, credit counts and per-category percentages
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// @ai:intent Create a new summary aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Per-category points in first-seen category order
    /// @ai:effects pure
    fn by_category(auto_scored: &[AutoScoredResult]) -> Vec<CategoryScore> {
        let mut categories: Vec<&str> = Vec::new();
        for result in auto_scored {
            if !categories.contains(&result.category.as_str()) {
                categories.push(&result.category);
            }
        }

        categories
            .into_iter()
            .map(|category| {
                let scores: Vec<f64> = auto_scored
                    .iter()
                    .filter(|r| r.category == category)
                    .map(|r| r.score)
                    .collect();
                let score: f64 = scores.iter().sum();

                CategoryScore {
                    category: category.to_string(),
                    score,
                    max_score: scores.len(),
                    percentage: percentage(score, scores.len()),
                }
            })
            .collect()
    }
}

impl Default for SummaryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryAggregatorTrait for SummaryAggregator {
    /// @ai:intent Summarize a run; the percentage is 0 when nothing was auto-scored
    /// @ai:effects pure
    fn summarize(
        &self,
        auto_scored: &[AutoScoredResult],
        temporal: &[TemporalResult],
        human_review: &[HumanReviewItem],
        not_answered: &[NotAnsweredItem],
    ) -> Summary {
        let total: f64 = auto_scored.iter().map(|r| r.score).sum();
        let count_with = |value: f64| auto_scored.iter().filter(|r| r.score == value).count();

        Summary {
            auto_scored_total_score: total,
            auto_scored_max_score: auto_scored.len(),
            auto_scored_percentage: percentage(total, auto_scored.len()),
            full_credit_count: count_with(FULL_CREDIT),
            partial_credit_count: count_with(PARTIAL_CREDIT),
            wrong_count: count_with(NO_CREDIT),
            temporal_pass: temporal.iter().filter(|t| t.recall.pass).count(),
            temporal_total: temporal.len(),
            human_review_count: human_review.len(),
            not_answered_count: not_answered.len(),
            by_category: Self::by_category(auto_scored),
        }
    }
}

/// @ai:intent Score as a percentage of the maximum, one decimal, ties to even
/// @ai:post 0 when max is 0
/// @ai:effects pure
fn percentage(score: f64, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        round_one_decimal(100.0 * score / max as f64)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
