//! Text Generation Provider Abstraction
//!
//! Defines the `TextGenerator` trait: prompt in, free text out. The
//! generator treats the remote model as an opaque completion endpoint;
//! all structure is recovered afterwards by `ai::validation`.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::time::Duration;

use crate::types::{AppError, GenerationError, Result};

/// Text completion provider
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the first candidate's text
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// HTTP client with both request and connect deadlines set
pub(crate) fn http_client(timeout: Duration, connect_timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
}
