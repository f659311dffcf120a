//! Error types for winloss-types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),
}
