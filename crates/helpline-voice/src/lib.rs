//! helpline-voice: speech boundary of the helpline pipeline
//!
//! Wraps the ElevenLabs speech APIs behind a narrow typed contract:
//! [`SpeechClient::transcribe`] for speech-to-text and
//! [`SpeechClient::synthesize`] for text-to-speech. Both directions are
//! rate-gated per client instance, and transcriptions pass an
//! empty-text and confidence gate before they reach the caller.
//!
//! ```rust,ignore
//! use helpline_voice::{SpeechClient, SpeechConfig};
//!
//! let client = SpeechClient::new(SpeechConfig::new("your-api-key"))?;
//! let audio = std::fs::read("recording.wav")?;
//! let result = client.transcribe(&audio, "recording.wav", "auto").await?;
//! println!("Transcription: {}", result.text);
//! ```

pub mod error;
pub mod speech;

pub use error::{Result, VoiceError};
pub use speech::{SpeechClient, SpeechConfig, Transcription};
