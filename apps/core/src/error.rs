use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g., an unreadable vocabulary file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON, either in a vocabulary file or a log card payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents configuration-related errors (bad environment values, invalid vocabulary).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents failures reported by a remote text generator.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("Invalid pattern: {}", err))
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}
