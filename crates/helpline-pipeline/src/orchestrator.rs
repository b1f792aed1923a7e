//! Five-stage pipeline orchestrator
//!
//! Drives speech-to-text, the two conditional translation hops, the
//! language model, and text-to-speech in strict sequence. The resolved
//! language is fixed once, right after transcription, and every later
//! routing decision reads that one value.

use std::sync::Arc;

use tracing::{info, warn};

use helpline_core::language::{self, AUTO, PIVOT};

use crate::error::{PipelineError, Result};
use crate::traits::{LanguageModel, SpeechService, TranslationService};

/// Fixed system instruction for the model stage.
const SYSTEM_PROMPT: &str = "You are a helpful agricultural helpline assistant for Indian farmers. \
     Provide practical, safe, and region-agnostic advice. Keep answers concise.";

/// Audio handed to one pipeline run. The filename travels with the
/// bytes so the speech service can label the upload honestly.
#[derive(Debug, Clone, Copy)]
pub struct AudioInput<'a> {
    pub bytes: &'a [u8],
    pub filename: &'a str,
}

/// Terminal aggregate of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Language fixed after transcription and used for all routing;
    /// `"auto"` when detection failed and no hint was declared
    pub input_language: String,
    /// Raw transcribed text
    pub transcribed_text: String,
    /// Pivot-bound translation of the query; absent when translation
    /// was skipped
    pub translated_query: Option<String>,
    /// Model reply, always in the pivot language
    pub llm_response_en: String,
    /// Reply in the caller's language (the reply itself when no
    /// back-translation ran)
    pub final_text: String,
    /// Synthesized audio bytes
    pub output_audio: Vec<u8>,
}

/// Pipeline orchestrator over the three service collaborators.
pub struct HelplinePipeline {
    speech: Arc<dyn SpeechService>,
    translator: Arc<dyn TranslationService>,
    model: Arc<dyn LanguageModel>,
}

impl HelplinePipeline {
    /// Create an orchestrator from collaborator instances.
    pub fn new(
        speech: Arc<dyn SpeechService>,
        translator: Arc<dyn TranslationService>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            speech,
            translator,
            model,
        }
    }

    /// Run the five-stage pipeline over one audio input.
    ///
    /// Both declared codes are validated before any collaborator is
    /// invoked; the target additionally permits the pivot language.
    /// Any stage failure aborts the run with the collaborator's
    /// original error.
    pub async fn run(
        &self,
        input: AudioInput<'_>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<PipelineResult> {
        if !language::is_supported_or_auto(source_lang) {
            return Err(PipelineError::UnsupportedLanguage(source_lang.to_string()));
        }
        if !language::is_supported_or_auto(target_lang) && target_lang != PIVOT {
            return Err(PipelineError::UnsupportedLanguage(target_lang.to_string()));
        }

        info!("step 1: converting speech to text");
        let transcription = self
            .speech
            .transcribe(input.bytes, input.filename, source_lang)
            .await?;
        info!("transcribed text: {}", transcription.text);

        // The detected language wins over the declared hint; fixed here
        // for the rest of the run.
        let resolved = transcription
            .language
            .clone()
            .unwrap_or_else(|| source_lang.to_string());

        let (translated_query, query_for_model) = if resolved == AUTO {
            // No concrete language pair exists for the translator.
            warn!("source language unresolved; skipping translation to English");
            (None, transcription.text.clone())
        } else {
            info!("step 2: translating query from {resolved} to English");
            let forward = self
                .translator
                .translate(&transcription.text, &resolved, PIVOT)
                .await?;
            info!("translated query: {}", forward.translated_text);
            (Some(forward.translated_text.clone()), forward.translated_text)
        };

        info!("step 3: generating model response");
        let llm_response_en = self.model.complete(SYSTEM_PROMPT, &query_for_model).await?;
        info!("model response: {}", llm_response_en);

        let final_text = if resolved == PIVOT || resolved == AUTO {
            llm_response_en.clone()
        } else {
            info!("step 4: translating response back to {resolved}");
            let back = self
                .translator
                .translate(&llm_response_en, PIVOT, &resolved)
                .await?;
            info!("final translated response: {}", back.translated_text);
            back.translated_text
        };

        info!("step 5: converting text to speech");
        let speech_lang = if resolved == AUTO { PIVOT } else { resolved.as_str() };
        let output_audio = self.speech.synthesize(&final_text, speech_lang).await?;

        Ok(PipelineResult {
            input_language: resolved,
            transcribed_text: transcription.text,
            translated_query,
            llm_response_en,
            final_text,
            output_audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use helpline_translate::{TranslateError, Translation};
    use helpline_voice::{Transcription, VoiceError};
    use std::sync::Mutex;

    fn question(bytes: &'static [u8]) -> AudioInput<'static> {
        AudioInput {
            bytes,
            filename: "question.wav",
        }
    }

    /// Shared log of collaborator invocations, in call order.
    #[derive(Default)]
    struct CallLog(Mutex<Vec<String>>);

    impl CallLog {
        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeSpeech {
        text: &'static str,
        confidence: f32,
        detected: Option<&'static str>,
        fail: Option<fn() -> VoiceError>,
        log: Arc<CallLog>,
    }

    #[async_trait]
    impl SpeechService for FakeSpeech {
        async fn transcribe(
            &self,
            _audio: &[u8],
            filename: &str,
            language_hint: &str,
        ) -> Result<Transcription> {
            self.log.push(format!("transcribe:{filename}:{language_hint}"));
            if let Some(fail) = self.fail {
                return Err(fail().into());
            }
            Ok(Transcription {
                text: self.text.to_string(),
                confidence: self.confidence,
                language: self.detected.map(str::to_string),
            })
        }

        async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
            self.log.push(format!("synthesize:{language}:{text}"));
            Ok(vec![0xAA, 0xBB, 0xCC])
        }
    }

    struct FakeTranslator {
        /// (input text, target) -> output text; unmatched inputs echo
        /// with a marker so tests notice unexpected calls
        mappings: Vec<(&'static str, &'static str, &'static str)>,
        quality: f32,
        fail_low_quality: bool,
        log: Arc<CallLog>,
    }

    #[async_trait]
    impl TranslationService for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            source_lang: &str,
            target_lang: &str,
        ) -> Result<Translation> {
            self.log.push(format!("translate:{source_lang}->{target_lang}"));
            if self.fail_low_quality {
                return Err(TranslateError::LowQuality {
                    score: 0.2,
                    min: 0.6,
                }
                .into());
            }
            let translated = self
                .mappings
                .iter()
                .find(|(input, target, _)| *input == text && *target == target_lang)
                .map(|(_, _, output)| output.to_string())
                .unwrap_or_else(|| format!("<untranslated:{text}>"));
            Ok(Translation {
                translated_text: translated,
                quality_score: self.quality,
                source_lang: source_lang.to_string(),
                target_lang: target_lang.to_string(),
            })
        }
    }

    struct FakeModel {
        reply: &'static str,
        log: Arc<CallLog>,
    }

    #[async_trait]
    impl LanguageModel for FakeModel {
        async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.log.push(format!("complete:{user_prompt}"));
            Ok(self.reply.to_string())
        }
    }

    struct Harness {
        pipeline: HelplinePipeline,
        log: Arc<CallLog>,
    }

    fn harness(
        speech: impl FnOnce(Arc<CallLog>) -> FakeSpeech,
        translator: impl FnOnce(Arc<CallLog>) -> FakeTranslator,
        model: impl FnOnce(Arc<CallLog>) -> FakeModel,
    ) -> Harness {
        let log = Arc::new(CallLog::default());
        let pipeline = HelplinePipeline::new(
            Arc::new(speech(log.clone())),
            Arc::new(translator(log.clone())),
            Arc::new(model(log.clone())),
        );
        Harness { pipeline, log }
    }

    fn hindi_speech(log: Arc<CallLog>) -> FakeSpeech {
        FakeSpeech {
            text: "मुझे मदद चाहिए",
            confidence: 0.9,
            detected: Some("hi"),
            fail: None,
            log,
        }
    }

    fn hindi_translator(log: Arc<CallLog>) -> FakeTranslator {
        FakeTranslator {
            mappings: vec![
                ("मुझे मदद चाहिए", "en", "I need help"),
                ("Please describe your issue.", "hi", "कृपया अपनी समस्या बताएं।"),
            ],
            quality: 0.8,
            fail_low_quality: false,
            log,
        }
    }

    fn helpline_model(log: Arc<CallLog>) -> FakeModel {
        FakeModel {
            reply: "Please describe your issue.",
            log,
        }
    }

    #[tokio::test]
    async fn test_unsupported_source_fails_before_any_call() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        let err = h.pipeline.run(question(b"..."), "xx", "en").await.unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedLanguage(code) if code == "xx"));
        assert!(h.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_target_fails_before_any_call() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        let err = h.pipeline.run(question(b"..."), "hi", "zz").await.unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedLanguage(code) if code == "zz"));
        assert!(h.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_auto_target_is_accepted() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        assert!(h.pipeline.run(question(b"..."), "hi", "auto").await.is_ok());
    }

    #[tokio::test]
    async fn test_hindi_end_to_end() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        let result = h.pipeline.run(question(b"audio"), "auto", "en").await.unwrap();

        assert_eq!(result.input_language, "hi");
        assert_eq!(result.transcribed_text, "मुझे मदद चाहिए");
        assert_eq!(result.translated_query.as_deref(), Some("I need help"));
        assert_eq!(result.llm_response_en, "Please describe your issue.");
        assert_eq!(result.final_text, "कृपया अपनी समस्या बताएं।");
        assert_eq!(result.output_audio, vec![0xAA, 0xBB, 0xCC]);

        // Strict stage order: exactly two translation calls, forward
        // then backward, and synthesis in the resolved language.
        assert_eq!(
            h.log.entries(),
            vec![
                "transcribe:question.wav:auto",
                "translate:hi->en",
                "complete:I need help",
                "translate:en->hi",
                "synthesize:hi:कृपया अपनी समस्या बताएं।",
            ]
        );
    }

    #[tokio::test]
    async fn test_input_filename_reaches_speech_service() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        let input = AudioInput {
            bytes: b"audio",
            filename: "voice.mp3",
        };
        h.pipeline.run(input, "auto", "en").await.unwrap();
        assert_eq!(h.log.entries()[0], "transcribe:voice.mp3:auto");
    }

    #[tokio::test]
    async fn test_auto_detection_skips_both_translations() {
        let h = harness(
            |log| FakeSpeech {
                text: "unknown words",
                confidence: 1.0,
                detected: None,
                fail: None,
                log,
            },
            hindi_translator,
            helpline_model,
        );
        let result = h.pipeline.run(question(b"audio"), "auto", "en").await.unwrap();

        assert_eq!(result.input_language, "auto");
        assert!(result.translated_query.is_none());
        assert_eq!(result.final_text, "Please describe your issue.");

        // Model gets the raw transcript verbatim; synthesis falls back
        // to the pivot language.
        assert_eq!(
            h.log.entries(),
            vec![
                "transcribe:question.wav:auto",
                "complete:unknown words",
                "synthesize:en:Please describe your issue.",
            ]
        );
    }

    #[tokio::test]
    async fn test_pivot_language_skips_back_translation() {
        let h = harness(
            |log| FakeSpeech {
                text: "I need help",
                confidence: 0.95,
                detected: Some("en"),
                fail: None,
                log,
            },
            |log| FakeTranslator {
                mappings: vec![("I need help", "en", "I need help")],
                quality: 0.9,
                fail_low_quality: false,
                log,
            },
            helpline_model,
        );
        let result = h.pipeline.run(question(b"audio"), "auto", "en").await.unwrap();

        assert_eq!(result.input_language, "en");
        assert_eq!(result.final_text, result.llm_response_en);
        // Forward translation still runs; only the backward hop is
        // skipped.
        assert_eq!(
            h.log.entries(),
            vec![
                "transcribe:question.wav:auto",
                "translate:en->en",
                "complete:I need help",
                "synthesize:en:Please describe your issue.",
            ]
        );
    }

    #[tokio::test]
    async fn test_detected_language_overrides_declared_hint() {
        let h = harness(hindi_speech, hindi_translator, helpline_model);
        let result = h.pipeline.run(question(b"audio"), "ta", "en").await.unwrap();
        assert_eq!(result.input_language, "hi");
        assert!(h.log.entries().contains(&"translate:hi->en".to_string()));
    }

    #[tokio::test]
    async fn test_declared_hint_stands_when_nothing_detected() {
        let h = harness(
            |log| FakeSpeech {
                text: "வணக்கம்",
                confidence: 1.0,
                detected: None,
                fail: None,
                log,
            },
            |log| FakeTranslator {
                mappings: vec![
                    ("வணக்கம்", "en", "Hello"),
                    ("Please describe your issue.", "ta", "உங்கள் பிரச்சனையை விவரிக்கவும்."),
                ],
                quality: 0.7,
                fail_low_quality: false,
                log,
            },
            helpline_model,
        );
        let result = h.pipeline.run(question(b"audio"), "ta", "en").await.unwrap();
        assert_eq!(result.input_language, "ta");
        assert_eq!(result.final_text, "உங்கள் பிரச்சனையை விவரிக்கவும்.");
    }

    #[tokio::test]
    async fn test_low_quality_translation_aborts_run() {
        let h = harness(
            hindi_speech,
            |log| FakeTranslator {
                mappings: vec![],
                quality: 0.0,
                fail_low_quality: true,
                log,
            },
            helpline_model,
        );
        let err = h.pipeline.run(question(b"audio"), "auto", "en").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Translation(TranslateError::LowQuality { .. })
        ));
        // The failing forward translation is the last call; neither the
        // model nor synthesis ran.
        assert_eq!(h.log.entries(), vec!["transcribe:question.wav:auto", "translate:hi->en"]);
    }

    #[tokio::test]
    async fn test_transcription_failure_surfaces_unchanged() {
        let h = harness(
            |log| FakeSpeech {
                text: "",
                confidence: 0.0,
                detected: None,
                fail: Some(|| VoiceError::LowConfidence { score: 0.4, min: 0.7 }),
                log,
            },
            hindi_translator,
            helpline_model,
        );
        let err = h.pipeline.run(question(b"audio"), "auto", "en").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Speech(VoiceError::LowConfidence { .. })
        ));
        assert_eq!(h.log.entries(), vec!["transcribe:question.wav:auto"]);
    }
}
