//! Error types for the jl-app service layer.

use crate::validate::ValidationError;
use std::path::PathBuf;

/// Application error type wrapping the backend crates for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse case file: {0}")]
    CaseParse(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    #[error("Results error: {0}")]
    Results(String),
}

/// Result type for jl-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Results(err.to_string())
    }
}
