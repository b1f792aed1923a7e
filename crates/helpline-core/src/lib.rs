//! helpline-core: shared kernel for the helpline voice pipeline
//!
//! Provides the pieces every collaborator needs:
//!
//! - **Configuration**: env-first loading with an optional `helpline.toml`
//! - **Language registry**: the supported-language table and validation
//!   predicates, plus the `"auto"` sentinel and the pivot language
//! - **Rate gate**: per-instance minimum-interval throttling
//! - **LLM client**: OpenAI-compatible chat completions (Groq)

pub mod config;
pub mod error;
pub mod language;
pub mod llm;
pub mod rate;

pub use config::Config;
pub use error::{Error, Result};
pub use language::{AUTO, PIVOT};
pub use llm::{LlmClient, LlmConfig};
pub use rate::RateGate;
