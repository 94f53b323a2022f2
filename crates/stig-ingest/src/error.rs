//! Error types for data source ingestion.

use std::path::PathBuf;

use stig_model::SourceRole;
use thiserror::Error;

/// Errors that can occur while resolving and loading input datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Resolution errors ===
    /// Data directory not found or not a directory.
    #[error("data directory not found: {path}")]
    DataDirNotFound { path: PathBuf },

    /// No usable revision of a required dataset exists in the data
    /// directory. Fatal: a run cannot proceed without its catalog sources.
    #[error("no {role} dataset for {revision} under {dir} (looked for {file})")]
    DataSourceNotFound {
        role: SourceRole,
        revision: String,
        dir: PathBuf,
        file: String,
    },

    // === File errors ===
    /// Failed to read a source file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parse errors ===
    /// Source file is not valid JSON or does not match the expected schema.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse a CSV level file.
    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// Level input file extension is not one we can read.
    #[error("unsupported level input format {path} (expected .json or .csv)")]
    UnsupportedLevelFormat { path: PathBuf },

    /// Level input parsed cleanly but defines no levels.
    #[error("no levels defined in {path}")]
    EmptyLevels { path: PathBuf },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
