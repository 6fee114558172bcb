//! @ai:module:intent Configuration structs for dataset tooling and scoring
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchConfig, PathConfig, ScoringConfig, ValidationConfig, FilterConfig
//! @ai:module:stateless true

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the ragbench tools
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// @ai:intent Locations of the dataset JSON files and generated output
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub ground_truth: PathBuf,
    pub rubrics: PathBuf,
    pub documents: PathBuf,
    pub database: PathBuf,
    pub company_meta: PathBuf,
    pub output_dir: PathBuf,
}

/// @ai:intent Thresholds and phrase lists used by the answer matchers
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Reference answers longer than this (in characters) go to human review
    pub auto_score_max_length: usize,
    pub numeric_relative_tolerance: f64,
    pub numeric_absolute_tolerance: f64,
    /// Containment credit needs the expected answer to be strictly longer than this
    pub min_containment_length: usize,
    pub temporal_pass_recall: f64,
    /// A short answer containing '?' counts as "no information"
    pub uncertain_answer_max_length: usize,
    pub negative_indicators: Vec<String>,
}

/// @ai:intent Bounds used when validating dataset documents
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub timestamp_start: NaiveDateTime,
    pub timestamp_end: NaiveDateTime,
}

/// @ai:intent Filter configuration for selecting questions
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub categories: Option<Vec<String>>,
    pub question_ids: Option<Vec<String>>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            ground_truth: PathBuf::from("dataset/ground_truth.json"),
            rubrics: PathBuf::from("dataset/qualitative_rubric.json"),
            documents: PathBuf::from("dataset/documents.json"),
            database: PathBuf::from("dataset/database.json"),
            company_meta: PathBuf::from("dataset/company_meta.json"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            auto_score_max_length: 80,
            numeric_relative_tolerance: 0.01,
            numeric_absolute_tolerance: 0.01,
            min_containment_length: 5,
            temporal_pass_recall: 0.8,
            uncertain_answer_max_length: 50,
            negative_indicators: default_negative_indicators(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            timestamp_start: default_timestamp("2023-06-01T00:00:00"),
            timestamp_end: default_timestamp("2024-07-31T23:59:59"),
        }
    }
}

fn default_timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap_or_default()
}

/// @ai:intent Phrases (Polish and English) that mark an answer as "not found"
/// @ai:effects pure
pub fn default_negative_indicators() -> Vec<String> {
    [
        "nie znaleziono",
        "brak informacji",
        "nie ma danych",
        "nie wiem",
        "nie można ustalić",
        "brak danych",
        "nie dotyczy",
        "n/a",
        "not found",
        "no information",
        "unknown",
        "nie występuje",
        "brak",
        "nie istnieje",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl BenchConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl FilterConfig {
    /// @ai:intent Check if filter matches a question
    /// @ai:effects pure
    pub fn matches(&self, category: &str, id: &str) -> bool {
        let category_match = self
            .categories
            .as_ref()
            .map(|c| c.iter().any(|cat| cat == category))
            .unwrap_or(true);

        let id_match = self
            .question_ids
            .as_ref()
            .map(|ids| ids.iter().any(|question_id| question_id == id))
            .unwrap_or(true);

        category_match && id_match
    }
}
