//! Gemini API Provider
//!
//! Text generation through the Generative Language REST API
//! (`models/{model}:generateContent`). The API key travels as the `key`
//! query parameter, so URLs are never logged and reqwest errors are
//! stripped of their URL before surfacing.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use super::{TextGenerator, http_client};
use crate::ai::timeout::{TimeoutConfig, with_timeout};
use crate::config::Config;
use crate::constants::generation::GENERATE_METHOD;
use crate::types::{AppError, GenerationError, Result, TimeoutError};

/// Gemini client with secure API key handling
pub struct GeminiClient {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: SecretString) -> Result<Self> {
        let timeouts = TimeoutConfig::from_config(config);
        let client = http_client(timeouts.generation, timeouts.connection)?;

        let api_base = config.generation.api_base.trim_end_matches('/').to_string();
        Url::parse(&api_base).map_err(|e| {
            AppError::Config(format!("Invalid generation api_base '{}': {}", api_base, e))
        })?;

        Ok(Self {
            api_key,
            api_base,
            model: config.generation.model.clone(),
            timeout: timeouts.generation,
            client,
        })
    }

    /// Build an endpoint URL with the API key attached
    fn endpoint(&self, path: &str) -> std::result::Result<Url, GenerationError> {
        let mut url = Url::parse(&format!("{}/{}", self.api_base, path))
            .map_err(|e| GenerationError::Request(format!("Invalid endpoint '{}': {}", path, e)))?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());
        Ok(url)
    }

    fn request_error(&self, operation: &str, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::timeout(operation, self.timeout)
        } else {
            GenerationError::Request(e.without_url().to_string())
        }
    }

    async fn send_generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let url = self.endpoint(&format!("models/{}:{}", self.model, GENERATE_METHOD))?;
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!("Sending request to Gemini API ({} prompt chars)", prompt.len());
        let start_time = Instant::now();

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(GENERATE_METHOD, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(GENERATE_METHOD, e))?;

        debug!(
            "Gemini responded {} in {}ms",
            status,
            start_time.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        if let Some(reason) = envelope.block_reason() {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        envelope.first_text().ok_or(GenerationError::MissingText)
    }

    /// List models that support `generateContent`
    pub async fn list_models(&self) -> std::result::Result<Vec<String>, GenerationError> {
        with_timeout(self.timeout, self.send_list_models(), "listModels").await
    }

    async fn send_list_models(&self) -> std::result::Result<Vec<String>, GenerationError> {
        let mut url = self.endpoint("models")?;
        url.query_pairs_mut().append_pair("pageSize", "1000");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error("listModels", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.request_error("listModels", e))?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let listing: ListModelsResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;

        Ok(listing
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_METHOD)
            })
            .map(|m| m.name)
            .collect())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        info!("Generating with Gemini (model: {})", self.model);
        with_timeout(self.timeout, self.send_generate(prompt), GENERATE_METHOD).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if non-empty
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}
