use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open '{}': {source}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProcessingError {
    /// True for per-record failures that are recovered by skipping the line.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProcessingError::MalformedRecord { .. })
    }
}
