//! Error types for helpline-core

use thiserror::Error;

/// Main error type for helpline-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned no choices")]
    NoChoices,

    #[error("model returned empty content")]
    EmptyContent,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for helpline-core
pub type Result<T> = std::result::Result<T, Error>;
