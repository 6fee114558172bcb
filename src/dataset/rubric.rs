//! @ai:module:intent Qualitative rubric definitions
//! @ai:module:layer domain
//! @ai:module:public_api RubricSet, Rubric
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Contents of qualitative_rubric.json
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RubricSet {
    #[serde(default)]
    pub rubrics: BTreeMap<String, Rubric>,
}

/// @ai:intent Must/should-mention criteria for one open-ended question
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rubric {
    /// None when the rubric file omits the key, which validation reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_mention: Option<Vec<String>>,
    #[serde(default)]
    pub should_mention: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<serde_json::Value>,
}

impl Rubric {
    pub fn must(&self) -> &[String] {
        self.must_mention.as_deref().unwrap_or(&[])
    }
}

impl RubricSet {
    /// @ai:intent Look up a rubric by id
    /// @ai:effects pure
    pub fn get(&self, rubric_id: &str) -> Option<&Rubric> {
        self.rubrics.get(rubric_id)
    }
}
