//! Blog Post Types
//!
//! `Category` is the fixed topical taxonomy; `GeneratedPost` is the
//! validated post handed from the generator to the publisher.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ValidationError;
use crate::ai::validation::{reject_markdown, validate_fragment};

// =============================================================================
// Category
// =============================================================================

/// Topical bucket assigned to every post before generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Product,
    Economy,
    Ecosystem,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Product, Category::Economy, Category::Ecosystem];

    /// CMS option value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Product => "Product",
            Category::Economy => "Economy",
            Category::Ecosystem => "Ecosystem",
        }
    }

    /// Thematic angle the prompt asks the model to write about
    pub fn angle(&self) -> &'static str {
        match self {
            Category::Product => {
                "Focus on Piggybank's features, the mini-app UI, and how to use it."
            }
            Category::Economy => {
                "Focus on Web3 rewards, on-chain incentives, and the Propaganda economy."
            }
            Category::Ecosystem => {
                "Focus on the Farcaster/Zora community and why Piggybank is the future of social apps."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" => Ok(Category::Product),
            "economy" => Ok(Category::Economy),
            "ecosystem" => Ok(Category::Ecosystem),
            _ => Err(format!(
                "Unknown category: {}. Valid values: product, economy, ecosystem",
                s
            )),
        }
    }
}

// =============================================================================
// Raw Post
// =============================================================================

/// Post object exactly as the model returned it.
///
/// Unknown keys are rejected so a drifting output format fails loudly.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPost {
    pub title: String,
    pub summary: String,
    pub html_content: String,
    /// Echoed by the model; never trusted
    pub category: String,
}

// =============================================================================
// Generated Post
// =============================================================================

/// A validated post ready for publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPost {
    title: String,
    summary: String,
    html_content: String,
    category: Category,
    featured: bool,
}

impl GeneratedPost {
    /// Validate a raw post and pin it to the pre-selected category.
    ///
    /// `featured` is always false; promotion is a manual CMS decision.
    pub fn from_raw(raw: RawPost, category: Category) -> Result<Self, ValidationError> {
        if raw.category != category.as_str() {
            debug!(
                "Overriding generated category '{}' with '{}'",
                raw.category, category
            );
        }

        let title = required("title", raw.title)?;
        let summary = required("summary", raw.summary)?;
        let html_content = required("html_content", raw.html_content)?;

        reject_markdown(&html_content).map_err(|e| e.with_field("html_content"))?;
        validate_fragment(&html_content).map_err(|e| e.with_field("html_content"))?;

        Ok(Self {
            title,
            summary,
            html_content,
            category,
            featured: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn html_content(&self) -> &str {
        &self.html_content
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn featured(&self) -> bool {
        self.featured
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(trimmed.to_string())
}
