//! @ai:module:intent Evaluation records and summary aggregation
//! @ai:module:layer application
//! @ai:module:public_api AutoScoredResult, HumanReviewItem, TemporalResult, NotAnsweredItem, Summary, EvaluationResults, SummaryAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{SummaryAggregator, SummaryAggregatorTrait};
pub use types::{
    format_score, AutoScoredResult, CategoryScore, EvaluationResults, HumanReviewItem,
    NotAnsweredItem, Summary, TemporalResult, NOT_ANSWERED,
};
