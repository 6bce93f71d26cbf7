//! Import/export error types

use thiserror::Error;

use crate::lists::ListError;
use crate::vocab::VocabError;

/// Errors that can occur while exporting or importing list files
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("not a JSON file")]
    NotJsonFile,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(String),

    #[error("Malformed list file: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Vocab(#[from] VocabError),
}

/// Result type alias for import/export operations
pub type TransferResult<T> = Result<T, TransferError>;
