//! Error types for helpline-voice

use thiserror::Error;

/// helpline-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("transcription returned empty text")]
    EmptyTranscript,

    #[error("transcription confidence {score:.2} below minimum {min:.2}")]
    LowConfidence { score: f32, min: f32 },

    #[error("speech-to-text API error {status}: {body}")]
    Transcription { status: u16, body: String },

    #[error("text-to-speech API error {status}: {body}")]
    Synthesis { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;
