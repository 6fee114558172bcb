//! @ai:module:intent Score document-list answers to temporal filter questions
//! @ai:module:layer application
//! @ai:module:public_api TemporalChecker, DocumentRecall
//! @ai:module:stateless true

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// @ai:intent Set comparison of cited document ids against the expected ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecall {
    pub correct: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub pass: bool,
}

/// @ai:intent Extracts doc_NNN ids from an answer and computes precision/recall
pub struct TemporalChecker {
    doc_id_regex: Regex,
    pass_recall: f64,
}

impl TemporalChecker {
    /// @ai:intent Create a checker that passes answers reaching the given recall
    /// @ai:effects pure
    pub fn new(pass_recall: f64) -> Self {
        Self {
            doc_id_regex: Regex::new(r"doc_\d+").unwrap(),
            pass_recall,
        }
    }

    /// @ai:intent Document ids cited in an answer, lowercased and deduplicated
    /// @ai:effects pure
    pub fn extract_ids(&self, submitted: &str) -> BTreeSet<String> {
        let lowered = submitted.to_lowercase();
        self.doc_id_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// @ai:intent Compare cited ids with expected ids
    /// @ai:effects pure
    /// @ai:post pass == (recall >= pass_recall)
    pub fn check(&self, submitted: &str, expected_ids: &[String]) -> DocumentRecall {
        let found = self.extract_ids(submitted);
        let expected: BTreeSet<String> = expected_ids.iter().cloned().collect();

        let correct: Vec<String> = found.intersection(&expected).cloned().collect();
        let missing: Vec<String> = expected.difference(&found).cloned().collect();
        let extra: Vec<String> = found.difference(&expected).cloned().collect();

        let precision = ratio(correct.len(), found.len());
        let recall = ratio(correct.len(), expected.len());
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        DocumentRecall {
            correct,
            missing,
            extra,
            precision,
            recall,
            f1,
            pass: recall >= self.pass_recall,
        }
    }
}

impl Default for TemporalChecker {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_documents_found() {
        let checker = TemporalChecker::default();
        let result = checker.check(
            "Dokumenty: DOC_003, doc_001 oraz doc_002.",
            &ids(&["doc_001", "doc_002", "doc_003"]),
        );

        assert_eq!(result.correct, ids(&["doc_001", "doc_002", "doc_003"]));
        assert!(result.missing.is_empty());
        assert!(result.extra.is_empty());
        assert!((result.f1 - 1.0).abs() < 1e-9);
        assert!(result.pass);
    }

    #[test]
    fn test_partial_recall_with_extra_ids() {
        let checker = TemporalChecker::default();
        let expected = ids(&["doc_001", "doc_002", "doc_003", "doc_004", "doc_005"]);
        let result = checker.check("doc_001 doc_002 doc_003 doc_004 doc_099", &expected);

        assert_eq!(result.missing, ids(&["doc_005"]));
        assert_eq!(result.extra, ids(&["doc_099"]));
        assert!((result.precision - 0.8).abs() < 1e-9);
        assert!((result.recall - 0.8).abs() < 1e-9);
        assert!((result.f1 - 0.8).abs() < 1e-9);
        assert!(result.pass);
    }

    #[test]
    fn test_low_recall_fails() {
        let checker = TemporalChecker::default();
        let result = checker.check("doc_001", &ids(&["doc_001", "doc_002"]));
        assert!((result.recall - 0.5).abs() < 1e-9);
        assert!((result.precision - 1.0).abs() < 1e-9);
        assert!(!result.pass);
    }

    #[test]
    fn test_no_ids_found() {
        let checker = TemporalChecker::default();
        let result = checker.check("Nie wiem", &ids(&["doc_001"]));
        assert_eq!(result.precision, 0.0);
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.f1, 0.0);
        assert!(!result.pass);
    }

    #[test]
    fn test_empty_expected_set() {
        let checker = TemporalChecker::default();
        let result = checker.check("doc_007", &[]);
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.extra, ids(&["doc_007"]));
        assert!(!result.pass);
    }
}
