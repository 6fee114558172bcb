//! @ai:module:intent Define error types for dataset loading, generation and scoring
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all ragbench library operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Table {table} is missing from the schema")]
    MissingTable { table: String },

    #[error("Unsupported format for document {id}: {format}")]
    UnsupportedFormat { id: String, format: String },

    #[error("Unknown question category: {0}")]
    UnknownCategory(String),

    #[error("Invalid timestamp in {id}: {value}")]
    InvalidTimestamp { id: String, value: String },

    #[error("Database verification failed: {0}")]
    Verification(String),
}

pub type Result<T> = std::result::Result<T, Error>;
