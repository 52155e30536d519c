//! Error types for the Rosetta library.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::TableFailure;

/// Main error type for Rosetta operations.
#[derive(Debug, Error)]
pub enum RosettaError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration document is not valid YAML or has the wrong shape.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Connection or query failure in the relational data source.
    #[error("Data source error: {0}")]
    DataSource(#[from] rusqlite::Error),

    /// Connection or query failure in a PostgreSQL data source.
    #[cfg(feature = "postgres")]
    #[error("Data source error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// The requested table does not exist (or exposes no columns).
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The inference service could not be reached or rejected the request.
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Code generation produced something it must never produce.
    #[error("Render error: {0}")]
    Render(String),

    /// Error writing a generated artifact.
    #[error("Failed to write '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every table in the batch failed.
    #[error("No tables could be processed ({} failed)", .0.len())]
    NoTablesProcessed(Vec<TableFailure>),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Rosetta operations.
pub type Result<T> = std::result::Result<T, RosettaError>;
