//! @ai:module:intent Dataset JSON contracts and loading
//! @ai:module:layer domain
//! @ai:module:public_api GroundTruth, Question, QuestionCategory, Submissions, RubricSet, DocumentSet, DatabaseDefinition, CompanyMeta, DatasetLoader

pub mod database;
pub mod documents;
pub mod ground_truth;
pub mod loader;
pub mod rubric;
pub mod submissions;
pub mod timestamp;

pub use database::{DatabaseDefinition, DatabaseMeta, Row, TableSchema};
pub use documents::{ActionItem, Document, DocumentSet, Recipient};
pub use ground_truth::{GroundTruth, Question, QuestionCategory};
pub use loader::{DatasetLoader, JsonDatasetLoader};
pub use rubric::{Rubric, RubricSet};
pub use submissions::{answer_to_text, Submissions};
pub use timestamp::Timestamp;

/// Contents of company_meta.json; only the presence of sections is checked.
pub type CompanyMeta = serde_json::Map<String, serde_json::Value>;
