//! Config Command
//!
//! Manage autoblog configuration.
//!
//! Usage:
//!   autoblog config show [-f json]
//!   autoblog config path
//!   autoblog config init [-g] [--force]

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show merged effective configuration
pub fn show(config: Option<&Path>, format: &str) -> Result<()> {
    ConfigLoader::show_config(config, format == "json")
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a default configuration file
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = ConfigLoader::init(global, force)?;
    println!("✓ Configuration ready");
    println!("  Config:  {}", path.display());
    println!("  Secrets: set GEMINI_API_KEY, WEBFLOW_API_TOKEN, WEBFLOW_COLLECTION_ID (or use .env)");
    Ok(())
}
