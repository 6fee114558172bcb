//! @ai:module:intent Ground-truth question definitions
//! @ai:module:layer domain
//! @ai:module:public_api GroundTruth, Question, QuestionCategory
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Category of ground-truth question, named after its JSON key
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    ExactMatchQuestions,
    MultiDocumentSynthesisQuestions,
    QualitativeQuestions,
    TemporalFilterQuestions,
    NegativeQuestions,
    OcrQuestions,
    MultiHopOcrQuestions,
    DatabaseQuestions,
    MultiHopDbDocQuestions,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 9] = [
        QuestionCategory::ExactMatchQuestions,
        QuestionCategory::MultiDocumentSynthesisQuestions,
        QuestionCategory::QualitativeQuestions,
        QuestionCategory::TemporalFilterQuestions,
        QuestionCategory::NegativeQuestions,
        QuestionCategory::OcrQuestions,
        QuestionCategory::MultiHopOcrQuestions,
        QuestionCategory::DatabaseQuestions,
        QuestionCategory::MultiHopDbDocQuestions,
    ];

    /// Categories scored by comparing against a short reference answer, in scoring order.
    pub const EXACT_MATCH_STYLE: [QuestionCategory; 6] = [
        QuestionCategory::ExactMatchQuestions,
        QuestionCategory::MultiDocumentSynthesisQuestions,
        QuestionCategory::OcrQuestions,
        QuestionCategory::MultiHopOcrQuestions,
        QuestionCategory::DatabaseQuestions,
        QuestionCategory::MultiHopDbDocQuestions,
    ];

    /// @ai:intent Convert category to its ground_truth.json key
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::ExactMatchQuestions => "exact_match_questions",
            QuestionCategory::MultiDocumentSynthesisQuestions => {
                "multi_document_synthesis_questions"
            }
            QuestionCategory::QualitativeQuestions => "qualitative_questions",
            QuestionCategory::TemporalFilterQuestions => "temporal_filter_questions",
            QuestionCategory::NegativeQuestions => "negative_questions",
            QuestionCategory::OcrQuestions => "ocr_questions",
            QuestionCategory::MultiHopOcrQuestions => "multi_hop_ocr_questions",
            QuestionCategory::DatabaseQuestions => "database_questions",
            QuestionCategory::MultiHopDbDocQuestions => "multi_hop_db_doc_questions",
        }
    }

    /// @ai:intent Parse a category from its JSON key
    /// @ai:effects pure
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == key)
    }

    /// @ai:intent Parse a comma-separated list of category keys
    /// @ai:post every entry is a known key, blanks are ignored
    /// @ai:effects pure
    pub fn parse_list(value: &str) -> crate::error::Result<Vec<Self>> {
        value
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| {
                Self::from_key(key)
                    .ok_or_else(|| crate::error::Error::UnknownCategory(key.to_string()))
            })
            .collect()
    }

    /// @ai:intent Whether answers in this category are auto-scored against a reference answer
    /// @ai:effects pure
    pub fn is_exact_match_style(&self) -> bool {
        Self::EXACT_MATCH_STYLE.contains(self)
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent A single ground-truth question; fields not used by a category stay empty
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_pl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    pub answer_variants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_behavior: Option<String>,
    pub expected_document_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planted_fact_id: Option<String>,
    pub source_documents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_ocr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_tables: Option<Vec<String>>,
}

impl Question {
    /// @ai:intent Question text shown in reports: Polish first, English as fallback
    /// @ai:effects pure
    pub fn display_text(&self) -> &str {
        self.question_pl
            .as_deref()
            .or(self.question_en.as_deref())
            .unwrap_or("")
    }

    /// @ai:intent Reference answer, empty when the question has none
    /// @ai:effects pure
    pub fn expected(&self) -> &str {
        self.expected_answer.as_deref().unwrap_or("")
    }
}

/// @ai:intent Contents of ground_truth.json
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTruth {
    pub meta: serde_json::Value,
    pub exact_match_questions: Vec<Question>,
    pub multi_document_synthesis_questions: Vec<Question>,
    pub qualitative_questions: Vec<Question>,
    pub temporal_filter_questions: Vec<Question>,
    pub negative_questions: Vec<Question>,
    pub ocr_questions: Vec<Question>,
    pub multi_hop_ocr_questions: Vec<Question>,
    pub database_questions: Vec<Question>,
    pub multi_hop_db_doc_questions: Vec<Question>,
}

impl GroundTruth {
    /// @ai:intent Questions of a single category
    /// @ai:effects pure
    pub fn questions(&self, category: QuestionCategory) -> &[Question] {
        match category {
            QuestionCategory::ExactMatchQuestions => &self.exact_match_questions,
            QuestionCategory::MultiDocumentSynthesisQuestions => {
                &self.multi_document_synthesis_questions
            }
            QuestionCategory::QualitativeQuestions => &self.qualitative_questions,
            QuestionCategory::TemporalFilterQuestions => &self.temporal_filter_questions,
            QuestionCategory::NegativeQuestions => &self.negative_questions,
            QuestionCategory::OcrQuestions => &self.ocr_questions,
            QuestionCategory::MultiHopOcrQuestions => &self.multi_hop_ocr_questions,
            QuestionCategory::DatabaseQuestions => &self.database_questions,
            QuestionCategory::MultiHopDbDocQuestions => &self.multi_hop_db_doc_questions,
        }
    }

    /// @ai:intent Iterate over every question with its category, in category order
    /// @ai:effects pure
    pub fn iter(&self) -> impl Iterator<Item = (QuestionCategory, &Question)> {
        QuestionCategory::ALL
            .into_iter()
            .flat_map(move |category| self.questions(category).iter().map(move |q| (category, q)))
    }

    /// @ai:intent Total number of questions across all categories
    /// @ai:effects pure
    pub fn total_questions(&self) -> usize {
        QuestionCategory::ALL
            .iter()
            .map(|c| self.questions(*c).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str_roundtrips_through_from_key() {
        for category in QuestionCategory::ALL {
            assert_eq!(QuestionCategory::from_key(category.as_str()), Some(category));
        }
        assert_eq!(QuestionCategory::from_key("bogus"), None);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            QuestionCategory::parse_list("negative_questions, ocr_questions,").unwrap(),
            vec![QuestionCategory::NegativeQuestions, QuestionCategory::OcrQuestions]
        );

        let err = QuestionCategory::parse_list("ocr_questions,negative").unwrap_err();
        assert!(matches!(err, crate::error::Error::UnknownCategory(ref key) if key == "negative"));
    }

    #[test]
    fn test_exact_match_style_excludes_review_categories() {
        assert!(QuestionCategory::OcrQuestions.is_exact_match_style());
        assert!(!QuestionCategory::QualitativeQuestions.is_exact_match_style());
        assert!(!QuestionCategory::NegativeQuestions.is_exact_match_style());
        assert!(!QuestionCategory::TemporalFilterQuestions.is_exact_match_style());
    }

    #[test]
    fn test_parse_ground_truth_with_missing_categories() {
        let json = r#"{
            "meta": {"version": "1.0"},
            "exact_match_questions": [
                {"id": "q001", "question_pl": "Kiedy?", "expected_answer": "2023-07-26",
                 "answer_variants": ["26.07.2023"], "planted_fact_id": "fact_001"}
            ],
            "negative_questions": [
                {"id": "q030", "question_en": "Who?", "expected_behavior": "no data"}
            ]
        }"#;

        let gt: GroundTruth = serde_json::from_str(json).unwrap();
        assert_eq!(gt.total_questions(), 2);
        assert!(gt.ocr_questions.is_empty());

        let q = &gt.exact_match_questions[0];
        assert_eq!(q.expected(), "2023-07-26");
        assert_eq!(q.answer_variants, vec!["26.07.2023"]);
        assert_eq!(q.display_text(), "Kiedy?");
        assert_eq!(gt.negative_questions[0].display_text(), "Who?");
    }

    #[test]
    fn test_iter_follows_category_order() {
        let gt = GroundTruth {
            negative_questions: vec![Question {
                id: "q2".to_string(),
                ..Default::default()
            }],
            exact_match_questions: vec![Question {
                id: "q1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let ids: Vec<_> = gt.iter().map(|(c, q)| (c, q.id.as_str())).collect();
        assert_eq!(
            ids,
            vec![
                (QuestionCategory::ExactMatchQuestions, "q1"),
                (QuestionCategory::NegativeQuestions, "q2"),
            ]
        );
    }
}
