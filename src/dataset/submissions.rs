//! @ai:module:intent Submitted answers from the RAG system under test
//! @ai:module:layer domain
//! @ai:module:public_api Submissions, answer_to_text
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// @ai:intent Map of question id to the submitted answer
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submissions {
    answers: BTreeMap<String, Value>,
}

impl Submissions {
    /// @ai:intent Build submissions from plain text answers
    /// @ai:effects pure
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// @ai:intent Answer text for a question, None when the question was not answered
    /// @ai:effects pure
    pub fn answer(&self, question_id: &str) -> Option<String> {
        self.answers.get(question_id).map(answer_to_text)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// @ai:intent Question ids present in the submission
    /// @ai:effects pure
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }
}

/// @ai:intent Render any JSON answer value as the text the matchers compare
/// @ai:effects pure
pub fn answer_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(answer_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
