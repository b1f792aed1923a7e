//! Configuration management
//!
//! Configuration is loaded with the following precedence:
//! 1. `helpline.toml` configuration file (if present)
//! 2. Environment variables
//! 3. Defaults
//!
//! API keys may be omitted from the file and supplied via the
//! environment. Missing required keys fail at load time, before any
//! pipeline run starts.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "helpline.toml";

/// Upstream service endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// ElevenLabs API base URL
    pub elevenlabs_base_url: String,
    /// Sarvam translation API base URL
    pub sarvam_base_url: String,
    /// Groq (OpenAI-compatible) API base URL
    pub groq_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            elevenlabs_base_url: "https://api.elevenlabs.io/v1".to_string(),
            sarvam_base_url: "https://api.sarvam.ai/v1".to_string(),
            groq_base_url: "https://api.groq.com/openai/v1".to_string(),
        }
    }
}

/// Quality gate thresholds
#[derive(Debug, Clone)]
pub struct Quality {
    /// Minimum accepted transcription confidence, in [0, 1]
    pub min_stt_confidence: f32,
    /// Minimum accepted translation quality score, in [0, 1]
    pub min_translation_quality: f32,
}

impl Default for Quality {
    fn default() -> Self {
        Self {
            min_stt_confidence: 0.7,
            min_translation_quality: 0.6,
        }
    }
}

/// Per-service request rate limits (calls per minute, 0 disables)
#[derive(Debug, Clone)]
pub struct RateLimits {
    pub stt_per_minute: u32,
    pub translation_per_minute: u32,
    pub llm_per_minute: u32,
    pub tts_per_minute: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            stt_per_minute: 10,
            translation_per_minute: 60,
            llm_per_minute: 20,
            tts_per_minute: 10,
        }
    }
}

/// Model and voice selection
#[derive(Debug, Clone)]
pub struct Models {
    /// Groq chat model name
    pub groq_model: String,
    /// ElevenLabs speech-to-text model
    pub stt_model: String,
    /// ElevenLabs text-to-speech model
    pub tts_model: String,
    /// ElevenLabs voice id used for synthesis (defaults to "Rachel")
    pub tts_voice_id: String,
}

impl Default for Models {
    fn default() -> Self {
        Self {
            groq_model: "mixtral-8x7b-32768".to_string(),
            stt_model: "scribe_v1".to_string(),
            tts_model: "eleven_multilingual_v2".to_string(),
            tts_voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
        }
    }
}

/// Main configuration for the helpline pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// ElevenLabs API key (required)
    pub elevenlabs_api_key: String,
    /// Sarvam API key (required)
    pub sarvam_api_key: String,
    /// Groq API key (required)
    pub groq_api_key: String,

    pub endpoints: Endpoints,
    pub quality: Quality,
    pub rate_limits: RateLimits,
    pub models: Models,

    /// Default declared source language when the CLI passes none
    pub default_source_lang: String,
    /// Default declared target language when the CLI passes none
    pub default_target_lang: String,
}

/// TOML file schema; every field is optional and falls back to the
/// environment or a default.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    elevenlabs_api_key: Option<String>,
    sarvam_api_key: Option<String>,
    groq_api_key: Option<String>,
    #[serde(default)]
    endpoints: TomlEndpoints,
    #[serde(default)]
    quality: TomlQuality,
    #[serde(default)]
    rate_limits: TomlRateLimits,
    #[serde(default)]
    models: TomlModels,
    default_source_lang: Option<String>,
    default_target_lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlEndpoints {
    elevenlabs_base_url: Option<String>,
    sarvam_base_url: Option<String>,
    groq_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlQuality {
    min_stt_confidence: Option<f32>,
    min_translation_quality: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlRateLimits {
    stt_per_minute: Option<u32>,
    translation_per_minute: Option<u32>,
    llm_per_minute: Option<u32>,
    tts_per_minute: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlModels {
    groq_model: Option<String>,
    stt_model: Option<String>,
    tts_model: Option<String>,
    tts_voice_id: Option<String>,
}

impl Config {
    /// Load configuration from `helpline.toml` if present, otherwise
    /// from the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from a specific TOML file, falling back to the environment
    /// when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Self::from_env()
        }
    }

    /// Build configuration from a TOML document. API keys missing from
    /// the document are read from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid config file: {e}")))?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            elevenlabs_base_url: toml
                .endpoints
                .elevenlabs_base_url
                .or_else(|| env_opt("ELEVENLABS_BASE_URL"))
                .unwrap_or(defaults.elevenlabs_base_url),
            sarvam_base_url: toml
                .endpoints
                .sarvam_base_url
                .or_else(|| env_opt("SARVAM_BASE_URL"))
                .unwrap_or(defaults.sarvam_base_url),
            groq_base_url: toml
                .endpoints
                .groq_base_url
                .or_else(|| env_opt("GROQ_BASE_URL"))
                .unwrap_or(defaults.groq_base_url),
        };

        let q = Quality::default();
        let quality = Quality {
            min_stt_confidence: toml_or_env(
                toml.quality.min_stt_confidence,
                "MIN_STT_CONFIDENCE",
                q.min_stt_confidence,
            )?,
            min_translation_quality: toml_or_env(
                toml.quality.min_translation_quality,
                "MIN_TRANSLATION_QUALITY",
                q.min_translation_quality,
            )?,
        };

        let r = RateLimits::default();
        let rate_limits = RateLimits {
            stt_per_minute: toml_or_env(
                toml.rate_limits.stt_per_minute,
                "RATE_LIMIT_STT",
                r.stt_per_minute,
            )?,
            translation_per_minute: toml_or_env(
                toml.rate_limits.translation_per_minute,
                "RATE_LIMIT_TRANSLATION",
                r.translation_per_minute,
            )?,
            llm_per_minute: toml_or_env(
                toml.rate_limits.llm_per_minute,
                "RATE_LIMIT_LLM",
                r.llm_per_minute,
            )?,
            tts_per_minute: toml_or_env(
                toml.rate_limits.tts_per_minute,
                "RATE_LIMIT_TTS",
                r.tts_per_minute,
            )?,
        };

        let m = Models::default();
        let models = Models {
            groq_model: toml
                .models
                .groq_model
                .or_else(|| env_opt("GROQ_MODEL_NAME"))
                .unwrap_or(m.groq_model),
            stt_model: toml
                .models
                .stt_model
                .or_else(|| env_opt("ELEVENLABS_STT_MODEL"))
                .unwrap_or(m.stt_model),
            tts_model: toml
                .models
                .tts_model
                .or_else(|| env_opt("ELEVENLABS_TTS_MODEL"))
                .unwrap_or(m.tts_model),
            tts_voice_id: toml
                .models
                .tts_voice_id
                .or_else(|| env_opt("ELEVENLABS_TTS_VOICE_ID"))
                .unwrap_or(m.tts_voice_id),
        };

        let (elevenlabs_api_key, sarvam_api_key, groq_api_key) = required_keys(
            toml.elevenlabs_api_key,
            toml.sarvam_api_key,
            toml.groq_api_key,
        )?;

        Ok(Self {
            elevenlabs_api_key,
            sarvam_api_key,
            groq_api_key,
            endpoints,
            quality,
            rate_limits,
            models,
            default_source_lang: toml
                .default_source_lang
                .or_else(|| env_opt("DEFAULT_SOURCE_LANG"))
                .unwrap_or_else(|| "auto".to_string()),
            default_target_lang: toml
                .default_target_lang
                .or_else(|| env_opt("DEFAULT_TARGET_LANG"))
                .unwrap_or_else(|| "en".to_string()),
        })
    }

    /// Build configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let (elevenlabs_api_key, sarvam_api_key, groq_api_key) =
            required_keys(None, None, None)?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            elevenlabs_base_url: env_or("ELEVENLABS_BASE_URL", defaults.elevenlabs_base_url),
            sarvam_base_url: env_or("SARVAM_BASE_URL", defaults.sarvam_base_url),
            groq_base_url: env_or("GROQ_BASE_URL", defaults.groq_base_url),
        };

        let q = Quality::default();
        let quality = Quality {
            min_stt_confidence: env_parse("MIN_STT_CONFIDENCE", q.min_stt_confidence)?,
            min_translation_quality: env_parse(
                "MIN_TRANSLATION_QUALITY",
                q.min_translation_quality,
            )?,
        };

        let r = RateLimits::default();
        let rate_limits = RateLimits {
            stt_per_minute: env_parse("RATE_LIMIT_STT", r.stt_per_minute)?,
            translation_per_minute: env_parse("RATE_LIMIT_TRANSLATION", r.translation_per_minute)?,
            llm_per_minute: env_parse("RATE_LIMIT_LLM", r.llm_per_minute)?,
            tts_per_minute: env_parse("RATE_LIMIT_TTS", r.tts_per_minute)?,
        };

        let m = Models::default();
        let models = Models {
            groq_model: env_or("GROQ_MODEL_NAME", m.groq_model),
            stt_model: env_or("ELEVENLABS_STT_MODEL", m.stt_model),
            tts_model: env_or("ELEVENLABS_TTS_MODEL", m.tts_model),
            tts_voice_id: env_or("ELEVENLABS_TTS_VOICE_ID", m.tts_voice_id),
        };

        Ok(Self {
            elevenlabs_api_key,
            sarvam_api_key,
            groq_api_key,
            endpoints,
            quality,
            rate_limits,
            models,
            default_source_lang: env_or("DEFAULT_SOURCE_LANG", "auto".to_string()),
            default_target_lang: env_or("DEFAULT_TARGET_LANG", "en".to_string()),
        })
    }
}

/// Resolve the three required API keys, collecting every missing one
/// into a single error message.
fn required_keys(
    elevenlabs: Option<String>,
    sarvam: Option<String>,
    groq: Option<String>,
) -> Result<(String, String, String)> {
    let elevenlabs = elevenlabs.or_else(|| env_opt("ELEVENLABS_API_KEY"));
    let sarvam = sarvam.or_else(|| env_opt("SARVAM_API_KEY"));
    let groq = groq.or_else(|| env_opt("GROQ_API_KEY"));

    let mut missing = Vec::new();
    if elevenlabs.is_none() {
        missing.push("ELEVENLABS_API_KEY");
    }
    if sarvam.is_none() {
        missing.push("SARVAM_API_KEY");
    }
    if groq.is_none() {
        missing.push("GROQ_API_KEY");
    }
    if !missing.is_empty() {
        return Err(Error::Config(format!(
            "missing required API keys: {}",
            missing.join(", ")
        )));
    }

    // Checked non-empty above
    Ok((elevenlabs.unwrap(), sarvam.unwrap(), groq.unwrap()))
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: String) -> String {
    env_opt(name).unwrap_or(default)
}

fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("invalid value for {name}: {e}"))),
        None => Ok(default),
    }
}

/// File wins over environment; environment wins over the default.
fn toml_or_env<T: FromStr>(value: Option<T>, name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => Ok(v),
        None => env_parse(name, default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.elevenlabs_base_url, "https://api.elevenlabs.io/v1");
        assert_eq!(endpoints.groq_base_url, "https://api.groq.com/openai/v1");

        let quality = Quality::default();
        assert_eq!(quality.min_stt_confidence, 0.7);
        assert_eq!(quality.min_translation_quality, 0.6);

        let limits = RateLimits::default();
        assert_eq!(limits.translation_per_minute, 60);
        assert_eq!(limits.tts_per_minute, 10);
    }

    #[test]
    fn test_full_toml() {
        let content = r#"
elevenlabs_api_key = "el-key"
sarvam_api_key = "sv-key"
groq_api_key = "gq-key"
default_source_lang = "hi"

[endpoints]
sarvam_base_url = "http://localhost:9000"

[quality]
min_translation_quality = 0.8

[rate_limits]
llm_per_minute = 5

[models]
groq_model = "llama-3.3-70b-versatile"
"#;
        let config = Config::from_toml_str(content).unwrap();
        assert_eq!(config.elevenlabs_api_key, "el-key");
        assert_eq!(config.endpoints.sarvam_base_url, "http://localhost:9000");
        // Untouched sections keep their defaults
        assert_eq!(config.endpoints.groq_base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.quality.min_translation_quality, 0.8);
        assert_eq!(config.rate_limits.llm_per_minute, 5);
        assert_eq!(config.models.groq_model, "llama-3.3-70b-versatile");
        assert_eq!(config.default_source_lang, "hi");
        assert_eq!(config.default_target_lang, "en");
    }

    #[test]
    fn test_toml_path_falls_back_to_env() {
        // set_var/remove_var are unsafe in edition 2024; these names
        // are touched by no other test in this binary.
        unsafe {
            std::env::set_var("MIN_STT_CONFIDENCE", "0.9");
            std::env::set_var("RATE_LIMIT_LLM", "7");
            std::env::set_var("GROQ_MODEL_NAME", "llama-3.1-8b-instant");
        }
        let content = r#"
elevenlabs_api_key = "el-key"
sarvam_api_key = "sv-key"
groq_api_key = "gq-key"

[quality]
min_translation_quality = 0.65
"#;
        let config = Config::from_toml_str(content).unwrap();
        unsafe {
            std::env::remove_var("MIN_STT_CONFIDENCE");
            std::env::remove_var("RATE_LIMIT_LLM");
            std::env::remove_var("GROQ_MODEL_NAME");
        }
        // Fields absent from the file come from the environment
        assert_eq!(config.quality.min_stt_confidence, 0.9);
        assert_eq!(config.rate_limits.llm_per_minute, 7);
        assert_eq!(config.models.groq_model, "llama-3.1-8b-instant");
        // Fields present in the file still win
        assert_eq!(config.quality.min_translation_quality, 0.65);
        // Untouched fields keep their defaults
        assert_eq!(config.rate_limits.tts_per_minute, 10);
    }

    #[test]
    fn test_missing_keys_are_collected() {
        let content = r#"
sarvam_api_key = "sv-key"
"#;
        // ELEVENLABS_API_KEY / GROQ_API_KEY are not set in the test
        // environment, so both must be reported.
        let err = Config::from_toml_str(content).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ELEVENLABS_API_KEY"), "{message}");
        assert!(message.contains("GROQ_API_KEY"), "{message}");
        assert!(!message.contains("SARVAM_API_KEY"), "{message}");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("not valid = [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
