//! Language-model HTTP client
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (Groq by
//! default). The client rate-gates every request and rejects responses
//! with no choices or blank content.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::rate::RateGate;

use super::types::*;

/// Configuration for the language-model client
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Chat model name
    pub model: String,
    /// Completion token budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Requests per minute (0 disables the rate gate)
    pub requests_per_minute: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl LlmConfig {
    /// Create a Groq configuration with default model and limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "mixtral-8x7b-32768".to_string(),
            max_tokens: 512,
            temperature: 0.3,
            requests_per_minute: 20,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the chat model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the requests-per-minute limit
    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.requests_per_minute = per_minute;
        self
    }
}

/// Language-model client
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
    gate: RateGate,
}

impl LlmClient {
    /// Create a new client from configuration.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;
        let gate = RateGate::new(config.requests_per_minute);

        Ok(Self {
            client,
            config,
            gate,
        })
    }

    /// Request a completion for a system/user prompt pair.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.gate.wait().await;

        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("sending chat completion to {}: model={}", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("chat completion failed: {} - {}", status, body);
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(Error::NoChoices);
        };
        let content = choice.message.content.trim();
        if content.is_empty() {
            return Err(Error::EmptyContent);
        }

        info!(
            "chat completion: {} chars, finish_reason={:?}, tokens={}",
            content.len(),
            choice.finish_reason,
            parsed.usage.map(|u| u.completion_tokens).unwrap_or(0)
        );

        Ok(content.to_string())
    }
}
