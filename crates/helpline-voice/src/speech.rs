//! ElevenLabs speech client
//!
//! One client covers both directions of the speech boundary:
//! speech-to-text over the multipart `/speech-to-text` endpoint and
//! text-to-speech over `/text-to-speech/{voice_id}`. Each direction has
//! its own rate gate since the upstream limits differ.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use helpline_core::RateGate;
use helpline_core::language::AUTO;

use crate::error::{Result, VoiceError};

/// Configuration for the speech client
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Speech-to-text model
    pub stt_model: String,
    /// Text-to-speech model
    pub tts_model: String,
    /// Voice id used for synthesis
    pub voice_id: String,
    /// Minimum accepted transcription confidence, in [0, 1]
    pub min_confidence: f32,
    /// Transcriptions per minute (0 disables the gate)
    pub stt_per_minute: u32,
    /// Syntheses per minute (0 disables the gate)
    pub tts_per_minute: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl SpeechConfig {
    /// Create an ElevenLabs configuration with default models and the
    /// "Rachel" voice.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            stt_model: "scribe_v1".to_string(),
            tts_model: "eleven_multilingual_v2".to_string(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            min_confidence: 0.7,
            stt_per_minute: 10,
            tts_per_minute: 10,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the speech-to-text model
    pub fn with_stt_model(mut self, model: impl Into<String>) -> Self {
        self.stt_model = model.into();
        self
    }

    /// Set the text-to-speech model
    pub fn with_tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = model.into();
        self
    }

    /// Set the synthesis voice id
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Set the minimum accepted transcription confidence
    pub fn with_min_confidence(mut self, min: f32) -> Self {
        self.min_confidence = min.clamp(0.0, 1.0);
        self
    }

    /// Set the per-minute rate limits for transcription and synthesis
    pub fn with_rate_limits(mut self, stt_per_minute: u32, tts_per_minute: u32) -> Self {
        self.stt_per_minute = stt_per_minute;
        self.tts_per_minute = tts_per_minute;
        self
    }
}

/// Transcription result
#[derive(Debug, Clone)]
pub struct Transcription {
    /// Transcribed text (non-empty)
    pub text: String,
    /// Self-reported confidence, in [0, 1]
    pub confidence: f32,
    /// Language detected by the service, if it reported one
    pub language: Option<String>,
}

/// Wire response of `/speech-to-text`
#[derive(Debug, Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language_code: Option<String>,
    #[serde(default)]
    language_probability: Option<f32>,
}

/// Pick the upload content type from the file extension. The service
/// sniffs the container itself, but the multipart part still needs an
/// honest type.
fn mime_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3" | "mpeg" | "mpga") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg" | "oga") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// ElevenLabs speech client
pub struct SpeechClient {
    client: Client,
    config: SpeechConfig,
    stt_gate: RateGate,
    tts_gate: RateGate,
}

impl SpeechClient {
    /// Create a new speech client from configuration.
    pub fn new(config: SpeechConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoiceError::Config(format!("failed to create HTTP client: {e}")))?;
        let stt_gate = RateGate::new(config.stt_per_minute);
        let tts_gate = RateGate::new(config.tts_per_minute);

        Ok(Self {
            client,
            config,
            stt_gate,
            tts_gate,
        })
    }

    /// Transcribe audio bytes.
    ///
    /// The language hint is forwarded unless it is the `"auto"`
    /// sentinel; the service's own detection, when reported, comes back
    /// in [`Transcription::language`]. Empty transcripts and
    /// transcripts below the confidence threshold are rejected.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
        language_hint: &str,
    ) -> Result<Transcription> {
        self.stt_gate.wait().await;

        let url = format!("{}/speech-to-text", self.config.base_url);

        info!("transcribing audio: {} bytes, filename: {}", audio.len(), filename);
        debug!("stt model: {}, language hint: {}", self.config.stt_model, language_hint);

        let mut form = reqwest::multipart::Form::new()
            .text("model_id", self.config.stt_model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name(filename.to_string())
                    .mime_str(mime_for(filename))
                    .map_err(|e| VoiceError::Config(format!("invalid mime type: {e}")))?,
            );

        if language_hint != AUTO {
            form = form.text("language_code", language_hint.to_string());
        }

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(VoiceError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Transcription {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SttResponse = response.json().await.map_err(VoiceError::Http)?;

        let text = payload.text.trim().to_string();
        if text.is_empty() {
            return Err(VoiceError::EmptyTranscript);
        }

        // The service omits the probability for some models; treat an
        // absent score as full confidence, matching its text-only shape.
        let confidence = payload.language_probability.unwrap_or(1.0);
        if confidence < self.config.min_confidence {
            return Err(VoiceError::LowConfidence {
                score: confidence,
                min: self.config.min_confidence,
            });
        }

        info!(
            "transcription complete: {} chars, confidence {:.2}, detected language {:?}",
            text.len(),
            confidence,
            payload.language_code
        );

        Ok(Transcription {
            text,
            confidence,
            language: payload.language_code,
        })
    }

    /// Synthesize text into audio bytes.
    ///
    /// The multilingual model infers pronunciation from the text
    /// itself; the language parameter is recorded for logging and voice
    /// selection by callers. A caller-supplied voice id overrides the
    /// configured default.
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.tts_gate.wait().await;

        let voice_id = voice.unwrap_or(&self.config.voice_id);
        let url = format!("{}/text-to-speech/{}", self.config.base_url, voice_id);

        info!("synthesizing speech: {} chars, language {}", text.len(), language);
        debug!("tts model: {}, voice: {}", self.config.tts_model, voice_id);

        let body = serde_json::json!({
            "text": text,
            "model_id": self.config.tts_model,
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(VoiceError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Synthesis {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await.map_err(VoiceError::Http)?;

        info!("synthesis complete: {} bytes", audio.len());

        Ok(audio.to_vec())
    }
}
