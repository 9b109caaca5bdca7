//! Content Generator
//!
//! select category → build prompt → complete → strip fences → parse →
//! validate. The selected category always wins over whatever the model
//! echoed back.

use tracing::{debug, info};

use super::prompt::PromptTemplates;
use super::provider::TextGenerator;
use super::selection::CategorySelector;
use super::validation::parse_post;
use crate::types::{Category, GeneratedPost, GenerationError};

/// Produces one validated post per call
pub struct ContentGenerator {
    provider: Box<dyn TextGenerator>,
    selector: Box<dyn CategorySelector>,
}

impl ContentGenerator {
    pub fn new(provider: Box<dyn TextGenerator>, selector: Box<dyn CategorySelector>) -> Self {
        Self { provider, selector }
    }

    /// Select a category and generate a post for it
    pub async fn generate(&mut self) -> Result<GeneratedPost, GenerationError> {
        let category = self.selector.select();
        info!(
            "Generating {} post (policy: {}, provider: {}/{})",
            category,
            self.selector.name(),
            self.provider.name(),
            self.provider.model()
        );
        self.generate_for(category).await
    }

    /// Generate a post for an already chosen category
    pub async fn generate_for(&self, category: Category) -> Result<GeneratedPost, GenerationError> {
        let prompt = PromptTemplates::blog_post(category).build();
        let text = self.provider.complete(&prompt).await?;

        debug!("Received {} chars of generated text", text.len());
        let raw = parse_post(&text)?;
        let post = GeneratedPost::from_raw(raw, category)?;

        info!("Generated '{}' ({})", post.title(), post.category());
        Ok(post)
    }
}
