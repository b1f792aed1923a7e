//! Error types for helpline-pipeline
//!
//! The orchestrator never downgrades a collaborator failure: each
//! wrapped error surfaces to the caller exactly as the collaborator
//! produced it.

use thiserror::Error;

/// helpline-pipeline error type
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Speech(#[from] helpline_voice::VoiceError),

    #[error(transparent)]
    Translation(#[from] helpline_translate::TranslateError),

    #[error(transparent)]
    Llm(#[from] helpline_core::Error),
}

/// Result type alias for helpline-pipeline
pub type Result<T> = std::result::Result<T, PipelineError>;
