//! Translation client configuration and result types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the translation client
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Minimum accepted quality score, in [0, 1]
    pub min_quality: f32,
    /// Requests per minute (0 disables the rate gate)
    pub requests_per_minute: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl TranslateConfig {
    /// Create a Sarvam configuration with default thresholds.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.sarvam.ai/v1".to_string(),
            min_quality: 0.6,
            requests_per_minute: 60,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the minimum accepted quality score
    pub fn with_min_quality(mut self, min: f32) -> Self {
        self.min_quality = min.clamp(0.0, 1.0);
        self
    }

    /// Set the requests-per-minute limit
    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.requests_per_minute = per_minute;
        self
    }
}

/// Translation result, reported with the caller's bare language codes
#[derive(Debug, Clone)]
pub struct Translation {
    /// Translated text (non-empty)
    pub translated_text: String,
    /// Self-reported quality score, in [0, 1]
    pub quality_score: f32,
    /// Source language code
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
}

/// Wire request of `/translate`
#[derive(Debug, Serialize)]
pub(crate) struct TranslateRequest<'a> {
    pub text: &'a str,
    pub source_lang: String,
    pub target_lang: String,
}

/// Wire response of `/translate`
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateResponse {
    #[serde(default)]
    pub translated_text: String,
    #[serde(default)]
    pub quality_score: f32,
}
