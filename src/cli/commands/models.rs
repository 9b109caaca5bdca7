//! Models Command
//!
//! List models available to the configured key that support
//! `generateContent`.

use std::path::PathBuf;

use crate::ai::GeminiClient;
use crate::cli::Output;
use crate::config::{ConfigLoader, Credentials};
use crate::types::Result;

pub async fn run(config: Option<PathBuf>, quiet: bool) -> Result<()> {
    let config = ConfigLoader::load(config.as_deref())?;
    let client = GeminiClient::new(&config, Credentials::gemini_key_from_env()?)?;

    let models = client.list_models().await?;
    let output = Output::quiet(quiet);

    if models.is_empty() {
        output.warning("No models supporting generateContent are visible to this key");
        return Ok(());
    }

    output.header("Models supporting generateContent");
    for name in &models {
        let marker = if name.trim_start_matches("models/") == config.generation.model {
            " (configured)"
        } else {
            ""
        };
        println!("  {}{}", name, marker);
    }
    Ok(())
}
