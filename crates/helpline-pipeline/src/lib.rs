//! helpline-pipeline: orchestrator for the multilingual helpline voice flow
//!
//! Sequences the five stages of a helpline interaction — speech-to-text,
//! conditional translation into the pivot language, model response,
//! conditional translation back, and text-to-speech — over three
//! collaborator services, and folds the run into one [`PipelineResult`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use helpline_pipeline::{AudioInput, HelplinePipeline};
//!
//! let pipeline = HelplinePipeline::new(
//!     Arc::new(speech_client),
//!     Arc::new(translate_client),
//!     Arc::new(llm_client),
//! );
//! let audio = std::fs::read("question.wav")?;
//! let input = AudioInput { bytes: &audio, filename: "question.wav" };
//! let result = pipeline.run(input, "auto", "en").await?;
//! std::fs::write("response.mp3", &result.output_audio)?;
//! ```

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

pub use error::{PipelineError, Result};
pub use orchestrator::{AudioInput, HelplinePipeline, PipelineResult};
pub use traits::{LanguageModel, SpeechService, TranslationService};
