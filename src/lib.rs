//! autoblog - Generated Blog Posts, Published
//!
//! Generates one blog post through the Gemini API and publishes it to a
//! Webflow CMS collection. One run, one post, no retries.
//!
//! ## Flow
//!
//! 1. Pick a category (time-of-day schedule, random, or fixed)
//! 2. Build the prompt and call `generateContent`
//! 3. Strip code fences, parse strictly, force the category, validate HTML
//! 4. Map onto the collection item schema and create the item (live or draft)
//!
//! ## Quick Start
//!
//! ```ignore
//! use autoblog::{ConfigLoader, ContentGenerator, Credentials, GeminiClient, Pipeline};
//! use autoblog::{WebflowPublisher, selector_for};
//!
//! let config = ConfigLoader::load(None)?;
//! let creds = Credentials::from_env()?;
//! let generator = ContentGenerator::new(
//!     Box::new(GeminiClient::new(&config, creds.gemini_api_key)?),
//!     selector_for(config.generation.category_policy, None),
//! );
//! let publisher = WebflowPublisher::new(&config, creds.cms_api_token, creds.collection_id)?;
//! let report = Pipeline::new(generator, publisher).run().await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: category selection, prompt, Gemini client, output validation
//! - [`cms`]: Webflow item mapping and publishing
//! - [`config`]: layered configuration and credentials
//! - [`pipeline`]: generate → publish orchestration

pub mod ai;
pub mod cli;
pub mod cms;
pub mod config;
pub mod constants;
pub mod pipeline;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{CategoryPolicy, Config, ConfigLoader, Credentials, PublishMode};

// Error Types
pub use types::error::{
    AppError, ErrorCategory, GenerationError, PublishError, Result, ValidationError,
};

// Domain
pub use types::{Category, GeneratedPost};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use ai::{
    CategorySelector, ContentGenerator, GeminiClient, TextGenerator, TimeoutConfig, selector_for,
};
pub use cms::{PublishResult, WebflowPublisher};
pub use pipeline::{Pipeline, RunReport};
