//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::metrics::EvaluationResults;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Render results as pretty-printed JSON
    fn render(&self, results: &EvaluationResults) -> Result<String>;

    /// @ai:intent Generate JSON report from results
    fn generate(&self, results: &EvaluationResults, output_path: &Path) -> Result<()>;

    /// @ai:intent Read a previously written results file
    fn load(&self, input_path: &Path) -> Result<EvaluationResults>;
}

/// @ai:intent Generates JSON reports from evaluation results
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects pure
    fn render(&self, results: &EvaluationResults) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &EvaluationResults, output_path: &Path) -> Result<()> {
        let json = self.render(results)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }

    /// @ai:effects fs:read
    fn load(&self, input_path: &Path) -> Result<EvaluationResults> {
        let content = std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read {}", input_path.display()))?;
        let results = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse results from {}", input_path.display()))?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::MatchRule;
    use crate::metrics::{AutoScoredResult, Summary};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_results() -> EvaluationResults {
        EvaluationResults {
            timestamp: "2026-01-19T00:00:00Z".to_string(),
            auto_scored: vec![AutoScoredResult {
                id: "em001".to_string(),
                category: "exact_match_questions".to_string(),
                question: "Kto podpisał umowę?...".to_string(),
                expected: "Maciej Boryna".to_string(),
                submitted: "Maciej Boryna".to_string(),
                variants: vec![],
                score: 1.0,
                matched_by: MatchRule::Exact,
            }],
            summary: Summary {
                auto_scored_total_score: 1.0,
                auto_scored_max_score: 1,
                auto_scored_percentage: 100.0,
                full_credit_count: 1,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        reporter.generate(&sample_results(), &output).unwrap();
        assert!(output.exists());

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"matched_by\": \"exact\""));
        assert!(content.contains("Maciej Boryna"));
    }

    #[test]
    fn test_load_written_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        reporter.generate(&sample_results(), &output).unwrap();
        let loaded = reporter.load(&output).unwrap();

        assert_eq!(loaded.summary, sample_results().summary);
        assert_eq!(loaded.auto_scored, sample_results().auto_scored);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = JsonReporter::new()
            .load(&temp.path().join("absent.json"))
            .unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
