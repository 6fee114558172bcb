//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::dataset::RubricSet;
use crate::evaluator::RubricGuide;
use crate::metrics::{format_score, AutoScoredResult, EvaluationResults, HumanReviewItem};
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Variants listed under a non-full score.
const MAX_LISTED_VARIANTS: usize = 3;
/// Question characters kept in the "Not Answered" list.
const NOT_ANSWERED_PREVIEW_CHARS: usize = 60;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Render results as a Markdown document
    fn render(&self, results: &EvaluationResults) -> String;

    /// @ai:intent Generate Markdown report from results
    fn generate(&self, results: &EvaluationResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from evaluation results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Status mark for a score
    /// @ai:effects pure
    fn status_mark(score: f64) -> &'static str {
        if score >= 1.0 {
            "✓"
        } else if score >= 0.5 {
            "½"
        } else {
            "✗"
        }
    }

    /// @ai:intent Generate summary section
    /// @ai:effects pure
    fn generate_summary(results: &EvaluationResults) -> String {
        let mut output = String::new();
        let summary = &results.summary;

        writeln!(output, "# RAG Evaluation Report").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "## Summary").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "- **Auto-scored:** {}/{} ({:.1}%)",
            format_score(summary.auto_scored_total_score),
            summary.auto_scored_max_score,
            summary.auto_scored_percentage
        )
        .unwrap();
        writeln!(output, "  - Full credit (1.0): {}", summary.full_credit_count).unwrap();
        writeln!(output, "  - Partial credit (0.5): {}", summary.partial_credit_count).unwrap();
        writeln!(output, "  - Wrong (0.0): {}", summary.wrong_count).unwrap();
        if summary.temporal_total > 0 {
            writeln!(
                output,
                "- **Temporal filter:** {}/{} passed",
                summary.temporal_pass, summary.temporal_total
            )
            .unwrap();
        }
        writeln!(
            output,
            "- **Semantic analysis:** {} questions",
            summary.human_review_count
        )
        .unwrap();
        if summary.not_answered_count > 0 {
            writeln!(
                output,
                "- **Not answered:** {} questions",
                summary.not_answered_count
            )
            .unwrap();
        }
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate auto-scored section grouped by category in first-seen order
    /// @ai:effects pure
    fn generate_auto_scored_section(results: &EvaluationResults) -> String {
        let mut output = String::new();

        writeln!(output, "## Auto-Scored Questions").unwrap();
        writeln!(output).unwrap();

        let mut categories: Vec<&str> = Vec::new();
        for result in &results.auto_scored {
            if !categories.contains(&result.category.as_str()) {
                categories.push(&result.category);
            }
        }

        for category in categories {
            let items: Vec<&AutoScoredResult> = results
                .auto_scored
                .iter()
                .filter(|r| r.category == category)
                .collect();
            let category_score: f64 = items.iter().map(|r| r.score).sum();

            writeln!(
                output,
                "### {} ({}/{})",
                category,
                format_score(category_score),
                items.len()
            )
            .unwrap();
            writeln!(output).unwrap();

            for result in items {
                writeln!(
                    output,
                    "**{}** {} ({})",
                    result.id,
                    Self::status_mark(result.score),
                    format_score(result.score)
                )
                .unwrap();
                writeln!(output, "- Q: {}", result.question).unwrap();
                writeln!(output, "- Expected: `{}`", result.expected).unwrap();
                writeln!(output, "- Submitted: `{}`", result.submitted).unwrap();
                if result.score < 1.0 && !result.variants.is_empty() {
                    let listed: Vec<&str> = result
                        .variants
                        .iter()
                        .take(MAX_LISTED_VARIANTS)
                        .map(String::as_str)
                        .collect();
                    writeln!(output, "- Variants: {}", listed.join(", ")).unwrap();
                }
                writeln!(output).unwrap();
            }
        }

        output
    }

    /// @ai:intent Generate temporal filter section
    /// @ai:effects pure
    fn generate_temporal_section(results: &EvaluationResults) -> String {
        let mut output = String::new();
        if results.temporal.is_empty() {
            return output;
        }

        writeln!(output, "## Temporal Filter Questions").unwrap();
        writeln!(output).unwrap();

        for result in &results.temporal {
            let recall = &result.recall;
            let mark = if recall.pass { "✓" } else { "✗" };
            writeln!(output, "**{}** {} (F1: {:.2})", result.id, mark, recall.f1).unwrap();
            writeln!(output, "- Q: {}", result.question).unwrap();
            writeln!(
                output,
                "- Recall: {:.1}%, Precision: {:.1}%",
                recall.recall * 100.0,
                recall.precision * 100.0
            )
            .unwrap();
            if !recall.missing.is_empty() {
                writeln!(output, "- Missing: {}", recall.missing.join(", ")).unwrap();
            }
            if !recall.extra.is_empty() {
                writeln!(output, "- Extra: {}", recall.extra.join(", ")).unwrap();
            }
            writeln!(output).unwrap();
        }

        output
    }

    /// @ai:intent Rubric criteria and the derived 0-5 scale
    /// @ai:effects pure
    fn generate_rubric_block(item: &HumanReviewItem, rubrics: Option<&RubricSet>) -> String {
        let mut output = String::new();

        let rubric = match (rubrics, item.rubric_id.as_deref()) {
            (Some(set), Some(id)) => set.get(id),
            _ => None,
        };
        let Some(rubric) = rubric else {
            return output;
        };

        writeln!(output, "**Rubric criteria:**").unwrap();
        for criterion in rubric.must() {
            writeln!(output, "- [MUST] {}", criterion).unwrap();
        }
        for criterion in &rubric.should_mention {
            writeln!(output, "- [SHOULD] {}", criterion).unwrap();
        }
        writeln!(output).unwrap();

        let guide = RubricGuide::from_rubric(rubric);
        writeln!(output, "**{}:**", guide.heading()).unwrap();
        for band in &guide.bands {
            writeln!(output, "- {}: {}", band.score, band.description).unwrap();
        }
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate the section for questions that need semantic grading
    /// @ai:effects pure
    fn generate_review_section(results: &EvaluationResults) -> String {
        let mut output = String::new();
        if results.human_review.is_empty() {
            return output;
        }

        writeln!(output, "## Requires Semantic Analysis").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Not auto-scored. Use human review or LLM-based evaluation."
        )
        .unwrap();
        writeln!(output).unwrap();

        for item in &results.human_review {
            writeln!(output, "### {} ({})", item.id, item.category).unwrap();
            writeln!(output).unwrap();
            writeln!(output, "**Question:** {}", item.question).unwrap();
            writeln!(output).unwrap();

            output.push_str(&Self::generate_rubric_block(item, results.rubrics.as_ref()));

            if let Some(reference) = item.reference_answer.as_deref().filter(|r| !r.is_empty()) {
                writeln!(output, "**Reference answer:**").unwrap();
                writeln!(output, "> {}", reference).unwrap();
                writeln!(output).unwrap();
                writeln!(output, "**Scoring:** 0=wrong, 1=partial match, 2=correct").unwrap();
                writeln!(output).unwrap();
            }

            writeln!(output, "**Submitted answer:**").unwrap();
            writeln!(output, "> {}", item.submitted).unwrap();
            writeln!(output).unwrap();
            writeln!(output, "---").unwrap();
            writeln!(output).unwrap();
        }

        output
    }

    /// @ai:intent Generate the list of unanswered questions
    /// @ai:effects pure
    fn generate_not_answered_section(results: &EvaluationResults) -> String {
        let mut output = String::new();
        if results.not_answered.is_empty() {
            return output;
        }

        writeln!(output, "## Not Answered").unwrap();
        writeln!(output).unwrap();
        for item in &results.not_answered {
            let preview: String = item
                .question
                .chars()
                .take(NOT_ANSWERED_PREVIEW_CHARS)
                .collect();
            writeln!(output, "- **{}** ({}): {}...", item.id, item.category, preview).unwrap();
        }
        writeln!(output).unwrap();

        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:effects pure
    fn render(&self, results: &EvaluationResults) -> String {
        let mut content = String::new();

        content.push_str(&Self::generate_summary(results));
        content.push_str(&Self::generate_auto_scored_section(results));
        content.push_str(&Self::generate_temporal_section(results));
        content.push_str(&Self::generate_review_section(results));
        content.push_str(&Self::generate_not_answered_section(results));

        content
    }

    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &EvaluationResults, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render(results))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Rubric;
    use crate::evaluator::{DocumentRecall, MatchRule};
    use crate::metrics::{NotAnsweredItem, Summary, TemporalResult, NOT_ANSWERED};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn auto(id: &str, category: &str, score: f64, variants: &[&str]) -> AutoScoredResult {
        AutoScoredResult {
            id: id.to_string(),
            category: category.to_string(),
            question: format!("Pytanie {}...", id),
            expected: "45".to_string(),
            submitted: "44".to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            score,
            matched_by: MatchRule::Unmatched,
        }
    }

    fn sample_results() -> EvaluationResults {
        let mut rubrics = BTreeMap::new();
        rubrics.insert(
            "rubric_ql001".to_string(),
            Rubric {
                must_mention: Some(vec!["opóźnienia".into(), "budżet".into(), "zespół".into()]),
                should_mention: vec!["klient".into(), "ryzyko".into()],
                scoring: None,
            },
        );

        EvaluationResults {
            timestamp: "2026-01-19T00:00:00Z".to_string(),
            auto_scored: vec![
                auto("em001", "exact_match_questions", 1.0, &[]),
                auto("db001", "database_questions", 0.5, &["a", "b", "c", "d"]),
                auto("em002", "exact_match_questions", 0.0, &[]),
            ],
            human_review: vec![
                HumanReviewItem {
                    id: "ql001".to_string(),
                    category: "qualitative".to_string(),
                    question: "Oceń projekt".to_string(),
                    rubric_id: Some("rubric_ql001".to_string()),
                    reference_answer: None,
                    submitted: NOT_ANSWERED.to_string(),
                },
                HumanReviewItem {
                    id: "ms003".to_string(),
                    category: "multi_document_synthesis_questions".to_string(),
                    question: "Opisz historię".to_string(),
                    rubric_id: None,
                    reference_answer: Some("Długa odpowiedź".to_string()),
                    submitted: "Krótka".to_string(),
                },
            ],
            temporal: vec![TemporalResult {
                id: "tf001".to_string(),
                question: "Które dokumenty?...".to_string(),
                submitted: "doc_001".to_string(),
                recall: DocumentRecall {
                    correct: vec!["doc_001".to_string()],
                    missing: vec!["doc_002".to_string()],
                    extra: vec![],
                    precision: 1.0,
                    recall: 0.5,
                    f1: 2.0 / 3.0,
                    pass: false,
                },
            }],
            not_answered: vec![NotAnsweredItem {
                id: "ng001".to_string(),
                category: "negative_questions".to_string(),
                question: "Jaki był budżet?".to_string(),
            }],
            summary: Summary {
                auto_scored_total_score: 1.5,
                auto_scored_max_score: 3,
                auto_scored_percentage: 50.0,
                full_credit_count: 1,
                partial_credit_count: 1,
                wrong_count: 1,
                temporal_pass: 0,
                temporal_total: 1,
                human_review_count: 2,
                not_answered_count: 1,
                by_category: vec![],
            },
            rubrics: Some(RubricSet { rubrics }),
        }
    }

    #[test]
    fn test_status_marks() {
        assert_eq!(MarkdownReporter::status_mark(1.0), "✓");
        assert_eq!(MarkdownReporter::status_mark(0.5), "½");
        assert_eq!(MarkdownReporter::status_mark(0.0), "✗");
    }

    #[test]
    fn test_summary_section() {
        let content = MarkdownReporter::new().render(&sample_results());
        assert!(content.starts_with("# RAG Evaluation Report\n"));
        assert!(content.contains("- **Auto-scored:** 1.5/3 (50.0%)"));
        assert!(content.contains("- **Temporal filter:** 0/1 passed"));
        assert!(content.contains("- **Not answered:** 1 questions"));
    }

    #[test]
    fn test_categories_grouped_in_first_seen_order() {
        let content = MarkdownReporter::new().render(&sample_results());
        let exact = content.find("### exact_match_questions (1.0/2)").unwrap();
        let database = content.find("### database_questions (0.5/1)").unwrap();
        assert!(exact < database);
        assert!(content.contains("**db001** ½ (0.5)"));
        assert!(content.contains("- Variants: a, b, c\n"));
    }

    #[test]
    fn test_temporal_section() {
        let content = MarkdownReporter::new().render(&sample_results());
        assert!(content.contains("**tf001** ✗ (F1: 0.67)"));
        assert!(content.contains("- Recall: 50.0%, Precision: 100.0%"));
        assert!(content.contains("- Missing: doc_002"));
    }

    #[test]
    fn test_review_section_includes_rubric_guide() {
        let content = MarkdownReporter::new().render(&sample_results());
        assert!(content.contains("- [MUST] opóźnienia"));
        assert!(content.contains("- [SHOULD] ryzyko"));
        assert!(content.contains("**Scoring (0-5, 3 MUST, 2 SHOULD):**"));
        assert!(content.contains("- 5: 3 MUST + ≥2 SHOULD"));
        assert!(content.contains("**Reference answer:**\n> Długa odpowiedź"));
        assert!(content.contains("**Scoring:** 0=wrong, 1=partial match, 2=correct"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let reporter = MarkdownReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.md");

        reporter.generate(&sample_results(), &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("## Not Answered"));
        assert!(content.contains("- **ng001** (negative_questions): Jaki był budżet?..."));
    }
}
