//! Run Command
//!
//! Generate one post and publish it.

use std::path::PathBuf;

use crate::ai::{ContentGenerator, GeminiClient, selector_for};
use crate::cli::Output;
use crate::cms::WebflowPublisher;
use crate::config::{ConfigLoader, Credentials, PublishMode};
use crate::pipeline::Pipeline;
use crate::types::{Category, Result};

pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub draft: bool,
    pub category: Option<Category>,
    pub quiet: bool,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let output = Output::quiet(options.quiet);

    let mut config = ConfigLoader::load(options.config.as_deref())?;
    config.apply_cli_overrides(options.draft);
    let credentials = Credentials::from_env()?;

    let generator = ContentGenerator::new(
        Box::new(GeminiClient::new(&config, credentials.gemini_api_key)?),
        selector_for(config.generation.category_policy, options.category),
    );
    let publisher =
        WebflowPublisher::new(&config, credentials.cms_api_token, credentials.collection_id)?;

    output.info(&format!(
        "Generating post with {} ({} publishing)",
        config.generation.model, config.cms.publish_mode
    ));

    let report = Pipeline::new(generator, publisher).run().await?;

    match report.result.mode {
        PublishMode::Live => {
            output.success(&format!("'{}' is now LIVE", report.result.title));
        }
        PublishMode::Draft => {
            output.success(&format!(
                "'{}' saved as a draft for review",
                report.result.title
            ));
        }
    }
    output.field("Category", report.post.category().as_str());
    if let Some(id) = &report.result.item_id {
        output.field("Item", id);
    }

    Ok(())
}
