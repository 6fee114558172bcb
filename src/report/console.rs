//! @ai:module:intent Coloured terminal rendering of evaluation results
//! @ai:module:layer presentation
//! @ai:module:public_api ConsoleReporter
//! @ai:module:stateless true

use crate::dataset::RubricSet;
use crate::evaluator::RubricGuide;
use crate::metrics::{AutoScoredResult, EvaluationResults, HumanReviewItem};
use colored::{Color, ColoredString, Colorize};

const RULE_WIDTH: usize = 72;
const ID_WIDTH: usize = 12;

/// @ai:intent Renders the summary, score tables and review panels for a terminal
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// @ai:intent Create a new console reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Colour of the overall score: green from 80%, yellow from 60%, red below
    /// @ai:effects pure
    pub fn score_color(percentage: f64) -> Color {
        if percentage >= 80.0 {
            Color::Green
        } else if percentage >= 60.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    /// @ai:intent Render the complete report as a string
    /// @ai:effects pure
    pub fn render(&self, results: &EvaluationResults) -> String {
        let mut output = String::new();

        output.push_str(&Self::render_summary(results));

        let with_score = |score: f64| -> Vec<&AutoScoredResult> {
            results
                .auto_scored
                .iter()
                .filter(|r| r.score == score)
                .collect()
        };
        let wrong = with_score(0.0);
        let partial = with_score(0.5);
        let full = with_score(1.0);

        if !wrong.is_empty() {
            output.push_str(&Self::render_table(
                &format!("Wrong ({})", wrong.len()),
                Color::Red,
                &wrong,
            ));
        }
        if !partial.is_empty() {
            output.push_str(&Self::render_table(
                &format!("Partial Credit ({})", partial.len()),
                Color::Yellow,
                &partial,
            ));
        }
        if !full.is_empty() {
            output.push_str(&Self::render_table(
                &format!("Full Credit ({})", full.len()),
                Color::Green,
                &full,
            ));
        }

        if !results.human_review.is_empty() {
            output.push_str(&format!(
                "{}\n{} {}\n",
                rule(Color::Blue),
                "Requires Semantic Analysis".bold(),
                "(not auto-scored - use human review or LLM-based evaluation)".dimmed()
            ));
            for item in &results.human_review {
                output.push_str(&Self::render_review_panel(item, results.rubrics.as_ref()));
            }
        }

        output
    }

    /// @ai:intent Print the report to stdout
    /// @ai:effects io
    pub fn print(&self, results: &EvaluationResults) {
        print!("{}", self.render(results));
    }

    fn render_summary(results: &EvaluationResults) -> String {
        let summary = &results.summary;
        let color = Self::score_color(summary.auto_scored_percentage);

        let mut output = String::new();
        output.push_str(&format!("{}\n", rule(color)));
        output.push_str(&format!("{}\n\n", "Score Summary".bold()));
        output.push_str(&format!(
            "{}\n\n",
            summary.score_line().color(color).bold()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Full credit (1.0):".green(),
            summary.full_credit_count
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Partial (0.5):".yellow(),
            summary.partial_credit_count
        ));
        output.push_str(&format!("{} {}\n", "Wrong (0.0):".red(), summary.wrong_count));
        if summary.temporal_total > 0 {
            output.push_str(&format!(
                "{} {}/{}\n",
                "Temporal filter:".cyan(),
                summary.temporal_pass,
                summary.temporal_total
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Semantic analysis:".blue(),
            summary.human_review_count
        ));
        if summary.not_answered_count > 0 {
            output.push_str(&format!(
                "{} {}\n",
                "Not answered:".dimmed(),
                summary.not_answered_count
            ));
        }
        output.push_str(&format!("{}\n\n", rule(color)));

        output
    }

    fn render_table(title: &str, color: Color, items: &[&AutoScoredResult]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", title.color(color).bold()));
        output.push_str(&format!("{}\n", rule(color)));
        output.push_str(&format!(
            "{:<width$} {}\n",
            "ID".bold(),
            "Expected / Submitted".bold(),
            width = ID_WIDTH
        ));
        for item in items {
            output.push_str(&format!(
                "{:<width$} {}\n{:<width$} {}\n",
                item.id.bold(),
                item.expected,
                "",
                item.submitted.dimmed(),
                width = ID_WIDTH
            ));
            output.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH).color(color).dimmed()));
        }
        output.push('\n');

        output
    }

    fn render_review_panel(item: &HumanReviewItem, rubrics: Option<&RubricSet>) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", rule(Color::Blue)));
        output.push_str(&format!(
            "{} {}\n\n",
            item.id.bold(),
            format!("({})", item.category).dimmed()
        ));
        output.push_str(&format!("{}\n\n", item.question));

        let rubric = match (rubrics, item.rubric_id.as_deref()) {
            (Some(set), Some(id)) => set.get(id),
            _ => None,
        };

        if let Some(reference) = item.reference_answer.as_deref().filter(|r| !r.is_empty()) {
            output.push_str(&format!("{}\n{}\n\n", "Reference:".green(), reference));
            output.push_str(&format!(
                "{} 0=wrong, 1=partial match, 2=correct\n\n",
                "Suggested scoring:".cyan()
            ));
        } else if let Some(rubric) = rubric {
            output.push_str(&format!("{}\n", "Rubric criteria:".green()));
            for criterion in rubric.must() {
                output.push_str(&format!("  {} {}\n", "MUST:".bold(), criterion));
            }
            for criterion in &rubric.should_mention {
                output.push_str(&format!("  {} {}\n", "SHOULD:".dimmed(), criterion));
            }
            output.push('\n');

            let guide = RubricGuide::from_rubric(rubric);
            output.push_str(&format!("{}\n", format!("{}:", guide.heading()).cyan()));
            for band in &guide.bands {
                output.push_str(&format!("  {}: {}\n", band.score, band.description));
            }
            output.push('\n');
        }

        output.push_str(&format!("{}\n{}\n\n", "Submitted:".yellow(), item.submitted));

        output
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn rule(color: Color) -> ColoredString {
    "=".repeat(RULE_WIDTH).color(color)
}
