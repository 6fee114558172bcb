//! @ai:module:intent JSON loader for dataset files and submissions
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatasetLoader, JsonDatasetLoader
//! @ai:module:stateless true

use crate::dataset::{
    CompanyMeta, DatabaseDefinition, DocumentSet, GroundTruth, RubricSet, Submissions,
};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// @ai:intent Trait for loading the dataset JSON contracts
pub trait DatasetLoader: Send + Sync {
    /// @ai:intent Load ground_truth.json
    fn load_ground_truth(&self, path: &Path) -> Result<GroundTruth>;

    /// @ai:intent Load a submissions file (question id -> answer)
    fn load_submissions(&self, path: &Path) -> Result<Submissions>;

    /// @ai:intent Load rubrics; a missing file is not an error
    fn load_rubrics(&self, path: &Path) -> Result<Option<RubricSet>>;

    /// @ai:intent Load documents.json
    fn load_documents(&self, path: &Path) -> Result<DocumentSet>;

    /// @ai:intent Load database.json
    fn load_database(&self, path: &Path) -> Result<DatabaseDefinition>;

    /// @ai:intent Load company_meta.json
    fn load_company_meta(&self, path: &Path) -> Result<CompanyMeta>;
}

/// @ai:intent Loads dataset files from the local filesystem
/// @ai:effects pure (stateless)
pub struct JsonDatasetLoader;

impl JsonDatasetLoader {
    /// @ai:intent Create a new dataset loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Read and deserialize a JSON file, attaching the path to errors
    /// @ai:pre path points to a UTF-8 JSON file
    /// @ai:effects fs:read
    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| Error::JsonParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for JsonDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader for JsonDatasetLoader {
    fn load_ground_truth(&self, path: &Path) -> Result<GroundTruth> {
        let ground_truth: GroundTruth = Self::read_json(path)?;
        tracing::debug!(
            "Loaded {} questions from {}",
            ground_truth.total_questions(),
            path.display()
        );
        Ok(ground_truth)
    }

    fn load_submissions(&self, path: &Path) -> Result<Submissions> {
        let submissions: Submissions = Self::read_json(path)?;
        tracing::debug!(
            "Loaded {} submitted answers from {}",
            submissions.len(),
            path.display()
        );
        Ok(submissions)
    }

    /// @ai:intent Load rubrics if the file exists
    /// @ai:effects fs:read
    fn load_rubrics(&self, path: &Path) -> Result<Option<RubricSet>> {
        if !path.exists() {
            tracing::info!("Rubrics file not found at {}, continuing without", path.display());
            return Ok(None);
        }

        Self::read_json(path).map(Some)
    }

    fn load_documents(&self, path: &Path) -> Result<DocumentSet> {
        Self::read_json(path)
    }

    fn load_database(&self, path: &Path) -> Result<DatabaseDefinition> {
        Self::read_json(path)
    }

    fn load_company_meta(&self, path: &Path) -> Result<CompanyMeta> {
        Self::read_json(path)
    }
}
