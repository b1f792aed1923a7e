//! Error types for helpline-translate

use thiserror::Error;

/// helpline-translate error type
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation returned empty text")]
    EmptyResult,

    #[error("translation quality {score:.2} below minimum {min:.2}")]
    LowQuality { score: f32, min: f32 },

    #[error("translation API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TranslateError>;
