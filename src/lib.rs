//! @ai:module:intent RAG benchmark dataset tooling library
//! @ai:module:layer application
//! @ai:module:public_api config, dataset, evaluator, generator, metrics, report, sqlite, validation

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod metrics;
pub mod report;
pub mod sqlite;
pub mod validation;

pub use config::BenchConfig;
pub use dataset::{DatasetLoader, GroundTruth, JsonDatasetLoader, QuestionCategory, Submissions};
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use generator::{FileGenerator, FileGeneratorTrait, GenerationSummary};
pub use metrics::{EvaluationResults, Summary, SummaryAggregator};
pub use report::{ConsoleReporter, ReportGenerator};
pub use sqlite::{build_database, DatabaseBuilder, DatabaseSummary};
pub use validation::{Dataset, DatasetValidator, Severity, ValidationReport};
