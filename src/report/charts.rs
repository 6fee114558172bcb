//! @ai:module:intent Chart generation for evaluation results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::metrics::EvaluationResults;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

pub const CATEGORY_CHART_FILE: &str = "by_category.png";

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from results, returning the file names written
    fn generate_all(&self, results: &EvaluationResults, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates charts from evaluation results
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Bar label and percentage per auto-scored category
    /// @ai:effects pure
    pub fn category_bars(results: &EvaluationResults) -> Vec<(String, f64)> {
        results
            .summary
            .by_category
            .iter()
            .map(|c| (short_label(&c.category), c.percentage))
            .collect()
    }

    /// @ai:intent Generate per-category score bar chart
    /// @ai:effects fs:write
    fn generate_category_chart(&self, results: &EvaluationResults, output_path: &Path) -> Result<()> {
        let data = Self::category_bars(results);

        let root = BitMapBackend::new(output_path, (900, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Auto-Scored Results by Category", ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..data.len() as i32, 0f64..100f64)?;

        chart
            .configure_mesh()
            .x_labels(data.len().max(1))
            .y_desc("Score (%)")
            .x_desc("Category")
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, percentage))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *percentage)],
                bar_color(*percentage).mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts; nothing is written when no answer was auto-scored
    /// @ai:effects fs:write
    fn generate_all(&self, results: &EvaluationResults, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();
        if results.summary.by_category.is_empty() {
            return Ok(generated);
        }

        let category_path = output_dir.join(CATEGORY_CHART_FILE);
        self.generate_category_chart(results, &category_path)?;
        generated.push(CATEGORY_CHART_FILE.to_string());

        Ok(generated)
    }
}

/// @ai:intent Category key without the "_questions" suffix
/// @ai:effects pure
fn short_label(category: &str) -> String {
    category
        .strip_suffix("_questions")
        .unwrap_or(category)
        .to_string()
}

fn bar_color(percentage: f64) -> RGBColor {
    if percentage >= 80.0 {
        GREEN
    } else if percentage >= 60.0 {
        RGBColor(230, 180, 0)
    } else {
        RED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CategoryScore, Summary};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_category_bars() {
        let results = EvaluationResults {
            summary: Summary {
                by_category: vec![
                    CategoryScore {
                        category: "exact_match_questions".to_string(),
                        score: 3.5,
                        max_score: 4,
                        percentage: 87.5,
                    },
                    CategoryScore {
                        category: "database_questions".to_string(),
                        score: 1.0,
                        max_score: 2,
                        percentage: 50.0,
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            ChartGenerator::category_bars(&results),
            vec![
                ("exact_match".to_string(), 87.5),
                ("database".to_string(), 50.0),
            ]
        );
    }

    #[test]
    fn test_no_chart_without_scores() {
        let temp = TempDir::new().unwrap();
        let files = ChartGenerator::new()
            .generate_all(&EvaluationResults::default(), temp.path())
            .unwrap();
        assert!(files.is_empty());
        assert!(!temp.path().join(CATEGORY_CHART_FILE).exists());
    }

    #[test]
    fn test_bar_color_thresholds() {
        assert_eq!(bar_color(90.0), GREEN);
        assert_eq!(bar_color(10.0), RED);
    }
}
