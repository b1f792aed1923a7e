//! Trait impls binding the concrete HTTP clients to the orchestrator

use async_trait::async_trait;

use helpline_core::LlmClient;
use helpline_translate::{TranslateClient, Translation};
use helpline_voice::{SpeechClient, Transcription};

use crate::error::Result;
use crate::traits::{LanguageModel, SpeechService, TranslationService};

#[async_trait]
impl SpeechService for SpeechClient {
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
        language_hint: &str,
    ) -> Result<Transcription> {
        Ok(SpeechClient::transcribe(self, audio, filename, language_hint).await?)
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        Ok(SpeechClient::synthesize(self, text, language, None).await?)
    }
}

#[async_trait]
impl TranslationService for TranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation> {
        Ok(TranslateClient::translate(self, text, source_lang, target_lang).await?)
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        Ok(LlmClient::complete(self, system_prompt, user_prompt).await?)
    }
}
