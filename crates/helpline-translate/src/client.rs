//! Sarvam translation client

use reqwest::Client;
use tracing::{debug, info, warn};

use helpline_core::RateGate;

use crate::error::{Result, TranslateError};
use crate::models::{TranslateConfig, TranslateRequest, TranslateResponse, Translation};

/// Translation client
pub struct TranslateClient {
    client: Client,
    config: TranslateConfig,
    gate: RateGate,
}

impl TranslateClient {
    /// Create a new translation client from configuration.
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslateError::Config(format!("failed to create HTTP client: {e}")))?;
        let gate = RateGate::new(config.requests_per_minute);

        Ok(Self {
            client,
            config,
            gate,
        })
    }

    /// Translate text between two concrete language codes.
    ///
    /// Callers pass bare registry codes (`"hi"`, `"en"`); the locale
    /// form the wire API expects (`"hi-IN"`) is client-private request
    /// shaping. Empty results and results below the quality threshold
    /// are rejected.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Translation> {
        self.gate.wait().await;

        let url = format!("{}/translate", self.config.base_url);
        let request = TranslateRequest {
            text,
            source_lang: wire_code(source_lang),
            target_lang: wire_code(target_lang),
        };

        info!("translating {} chars: {} -> {}", text.len(), source_lang, target_lang);
        debug!("wire language pair: {} -> {}", request.source_lang, request.target_lang);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(TranslateError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("translation failed: {} - {}", status, body);
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TranslateResponse = response.json().await.map_err(TranslateError::Http)?;

        let translated_text = payload.translated_text.trim().to_string();
        if translated_text.is_empty() {
            return Err(TranslateError::EmptyResult);
        }
        if payload.quality_score < self.config.min_quality {
            return Err(TranslateError::LowQuality {
                score: payload.quality_score,
                min: self.config.min_quality,
            });
        }

        info!(
            "translation complete: {} chars, quality {:.2}",
            translated_text.len(),
            payload.quality_score
        );

        Ok(Translation {
            translated_text,
            quality_score: payload.quality_score,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        })
    }
}

/// Expand a bare registry code to the API's locale form. Codes already
/// carrying a region tag pass through unchanged.
fn wire_code(code: &str) -> String {
    if code.contains('-') {
        code.to_string()
    } else {
        format!("{code}-IN")
    }
}
