//! Error types for the gradesheet library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gradesheet operations.
#[derive(Debug, Error)]
pub enum GradesheetError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the PDF parser.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Error reading or writing the preview artifact.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No candidate table survived extraction. This is the only
    /// extraction-stage condition that aborts an upload.
    #[error("no tables detected in document")]
    NoTablesDetected,

    /// The preview token does not reference a stored artifact
    /// (unknown, malformed, or already consumed).
    #[error("preview '{0}' not found")]
    PreviewNotFound(String),

    /// Error persisting or retrieving an intermediate artifact.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Empty input where data was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for gradesheet operations.
pub type Result<T> = std::result::Result<T, GradesheetError>;
