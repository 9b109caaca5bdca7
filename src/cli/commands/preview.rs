//! Preview Command
//!
//! Generate a post and show it with the CMS payload it would produce.
//! Nothing is published; only the generation key is required.

use std::path::PathBuf;

use crate::ai::{ContentGenerator, GeminiClient, selector_for};
use crate::cli::Output;
use crate::cms::WebflowPublisher;
use crate::config::{ConfigLoader, Credentials};
use crate::types::{Category, Result};

pub async fn run(
    config: Option<PathBuf>,
    category: Option<Category>,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let config = ConfigLoader::load(config.as_deref())?;
    let api_key = Credentials::gemini_key_from_env()?;

    let mut generator = ContentGenerator::new(
        Box::new(GeminiClient::new(&config, api_key)?),
        selector_for(config.generation.category_policy, category),
    );
    let post = generator.generate().await?;
    let payload = WebflowPublisher::build_payload(&post, config.cms.publish_mode);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let output = Output::quiet(quiet);
    output.header(post.title());
    output.field("Category", post.category().as_str());
    output.field("Mode", &config.cms.publish_mode.to_string());
    output.field("Summary", post.summary());
    if !output.is_quiet() {
        println!();
    }
    println!("{}", post.html_content());
    Ok(())
}
