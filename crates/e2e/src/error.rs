//! Error types for test execution

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Runner error: {0}")]
    Runner(String),

    #[error("Media conversion failed: {0}")]
    Media(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
