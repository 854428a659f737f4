use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors for a single segment/process call
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript source not found: {0:?}")]
    NotFound(PathBuf),

    #[error("No input file set")]
    NoSource,

    #[error("Unsupported transcript format: {0}")]
    UnsupportedFormat(String),

    #[error("Unrecognized transcript shape: {0}")]
    InvalidShape(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
