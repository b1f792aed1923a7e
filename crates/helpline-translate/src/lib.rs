//! helpline-translate: translation boundary of the helpline pipeline
//!
//! Wraps the Sarvam translation API behind a narrow typed contract.
//! Requests are rate-gated per client instance and responses pass an
//! empty-text and quality gate before they reach the caller.

pub mod client;
pub mod error;
pub mod models;

pub use client::TranslateClient;
pub use error::{Result, TranslateError};
pub use models::{TranslateConfig, Translation};
