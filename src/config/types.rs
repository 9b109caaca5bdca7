//! Configuration Types
//!
//! Non-secret settings (endpoints, model, timeouts, policies) with defaults,
//! plus the `Credentials` loaded separately from the environment.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{cms, env, generation, network};
use crate::types::{AppError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation endpoint settings
    pub generation: GenerationConfig,

    /// CMS settings
    pub cms: CmsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generation: GenerationConfig::default(),
            cms: CmsConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `AppError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        validate_base_url("generation.api_base", &self.generation.api_base)?;
        validate_base_url("cms.api_base", &self.cms.api_base)?;

        if self.generation.model.trim().is_empty() {
            return Err(AppError::Config(
                "generation.model must not be empty".to_string(),
            ));
        }

        if self.generation.timeout_secs == 0 {
            return Err(AppError::Config(
                "generation.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.cms.timeout_secs == 0 {
            return Err(AppError::Config(
                "cms.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.cms.api_version.trim().is_empty() {
            return Err(AppError::Config(
                "cms.api_version must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides; `--draft` forces draft publishing
    /// but its absence never forces live.
    pub fn apply_cli_overrides(&mut self, draft: bool) {
        if draft {
            self.cms.publish_mode = PublishMode::Draft;
        }
    }
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    let url = url::Url::parse(value)
        .map_err(|e| AppError::Config(format!("{} is not a valid URL '{}': {}", key, value, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Config(format!(
            "{} must use http or https, got '{}'",
            key, scheme
        ))),
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API base URL
    pub api_base: String,

    /// Model used for `generateContent`
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// How the post category is chosen
    pub category_policy: CategoryPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: generation::DEFAULT_API_BASE.to_string(),
            model: generation::DEFAULT_MODEL.to_string(),
            timeout_secs: network::GENERATION_TIMEOUT_SECS,
            category_policy: CategoryPolicy::default(),
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Category selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// UTC time-of-day windows
    #[default]
    Schedule,
    /// Uniform random choice
    Random,
}

impl std::fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryPolicy::Schedule => write!(f, "schedule"),
            CategoryPolicy::Random => write!(f, "random"),
        }
    }
}

// =============================================================================
// CMS Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// API base URL
    pub api_base: String,

    /// `accept-version` header value
    pub api_version: String,

    /// Whether new items go live immediately or wait as drafts
    pub publish_mode: PublishMode,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_base: cms::DEFAULT_API_BASE.to_string(),
            api_version: cms::DEFAULT_API_VERSION.to_string(),
            publish_mode: PublishMode::default(),
            timeout_secs: network::PUBLISH_TIMEOUT_SECS,
        }
    }
}

impl CmsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Visibility of newly created CMS items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishMode {
    /// Publish directly through the `/live` endpoint
    #[default]
    Live,
    /// Create a draft for review
    Draft,
}

impl PublishMode {
    /// Value of the item's `isDraft` flag
    pub fn is_draft(&self) -> bool {
        matches!(self, PublishMode::Draft)
    }

    /// Path appended to the collection items URL
    pub fn items_path(&self) -> &'static str {
        match self {
            PublishMode::Live => "items/live",
            PublishMode::Draft => "items",
        }
    }
}

impl std::fmt::Display for PublishMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishMode::Live => write!(f, "live"),
            PublishMode::Draft => write!(f, "draft"),
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Secrets required for a run. Never serialized, redacted in debug output.
pub struct Credentials {
    pub gemini_api_key: SecretString,
    pub cms_api_token: SecretString,
    pub collection_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"[REDACTED]")
            .field("cms_api_token", &"[REDACTED]")
            .field("collection_id", &self.collection_id)
            .finish()
    }
}

impl Credentials {
    /// Load all secrets from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load secrets through `lookup`; every variable is required
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            gemini_api_key: SecretString::from(require(&lookup, env::GEMINI_API_KEY)?),
            cms_api_token: SecretString::from(require(&lookup, env::WEBFLOW_API_TOKEN)?),
            collection_id: require(&lookup, env::WEBFLOW_COLLECTION_ID)?,
        })
    }

    /// Only the generation key, for commands that never touch the CMS
    pub fn gemini_key_from_env() -> Result<SecretString> {
        Self::gemini_key_from_lookup(|name| std::env::var(name).ok())
    }

    /// Only the generation key, through `lookup`
    pub fn gemini_key_from_lookup<F>(lookup: F) -> Result<SecretString>
    where
        F: Fn(&str) -> Option<String>,
    {
        require(&lookup, env::GEMINI_API_KEY).map(SecretString::from)
    }
}

/// Trimmed, non-empty value of `name`
fn require<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("{} is not set. Export it or add it to .env", name)))
}

// =============================================================================
// Tests
// =============================================================================
