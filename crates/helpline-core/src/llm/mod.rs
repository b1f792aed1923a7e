//! Language-model integration (OpenAI-compatible chat completions)

mod client;
mod types;

pub use client::{LlmClient, LlmConfig};
pub use types::{
    ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    Usage,
};
