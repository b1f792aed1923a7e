//! Collaborator contracts consumed by the orchestrator
//!
//! The orchestrator sees each external service only through these
//! traits; the concrete HTTP clients implement them in
//! [`crate::services`], and tests substitute recording mocks.

use async_trait::async_trait;

use helpline_translate::Translation;
use helpline_voice::Transcription;

use crate::error::Result;

/// Speech service: audio in, text out and back again.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Decode audio into text, with a declared-language hint. The
    /// original filename rides along so the service can infer the
    /// container format.
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
        language_hint: &str,
    ) -> Result<Transcription>;

    /// Render text as audio in the given language.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Translation service between two concrete language codes.
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation>;
}

/// Language model answering a system/user prompt pair.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
