//! @ai:module:intent Derive the 0-5 human grading scale from a rubric
//! @ai:module:layer application
//! @ai:module:public_api RubricGuide, ScoreBand
//! @ai:module:stateless true

use crate::dataset::Rubric;

/// @ai:intent One step of the grading scale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBand {
    pub score: u8,
    pub description: String,
}

/// @ai:intent Grading scale for a rubric with its MUST and SHOULD counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricGuide {
    pub must_count: usize,
    pub should_count: usize,
    /// SHOULD items needed for the top score
    pub should_threshold: usize,
    pub bands: Vec<ScoreBand>,
}

impl RubricGuide {
    /// @ai:intent Build the scale: 5 and 4 need every MUST, lower bands count MUST hits
    /// @ai:effects pure
    pub fn from_rubric(rubric: &Rubric) -> Self {
        Self::from_counts(rubric.must().len(), rubric.should_mention.len())
    }

    /// @ai:intent Build the scale from raw counts
    /// @ai:effects pure
    /// @ai:example (6, 4) -> threshold 3, bands "5 MUST", "4 MUST", "1-3 MUST"
    pub fn from_counts(must_count: usize, should_count: usize) -> Self {
        let should_threshold = ((should_count as f64 * 0.75).round_ties_even() as usize).max(1);
        let must = must_count as i64;

        let bands = vec![
            ScoreBand {
                score: 5,
                description: format!("{} MUST + ≥{} SHOULD", must_count, should_threshold),
            },
            ScoreBand {
                score: 4,
                description: format!("{} MUST + <{} SHOULD", must_count, should_threshold),
            },
            ScoreBand {
                score: 3,
                description: format!("{} MUST", format_range(must - 1, must - 1)),
            },
            ScoreBand {
                score: 2,
                description: format!("{} MUST", format_range(must / 2 + 1, must - 2)),
            },
            ScoreBand {
                score: 1,
                description: format!("{} MUST", format_range(1, must / 2)),
            },
            ScoreBand {
                score: 0,
                description: "0 MUST or factual errors".to_string(),
            },
        ];

        Self {
            must_count,
            should_count,
            should_threshold,
            bands,
        }
    }

    /// @ai:intent Heading line for the scale
    /// @ai:effects pure
    pub fn heading(&self) -> String {
        format!(
            "Scoring (0-5, {} MUST, {} SHOULD)",
            self.must_count, self.should_count
        )
    }
}

/// @ai:intent Render an inclusive range; empty ranges are marked unreachable
/// @ai:effects pure
fn format_range(lo: i64, hi: i64) -> String {
    if hi < lo || hi < 0 {
        "n/a (unreachable)".to_string()
    } else if lo == hi {
        lo.to_string()
    } else {
        format!("{}-{}", lo, hi)
    }
}
