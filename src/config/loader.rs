//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (<config dir>/autoblog/config.toml)
//! 3. Project config (./autoblog.toml, or the file passed with --config)
//! 4. Environment variables (AUTOBLOG_* prefix, `__` between sections)
//!
//! Secrets never pass through Figment; see `Credentials`.

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::Config;
use crate::constants::env;
use crate::types::{AppError, Result};

const PROJECT_CONFIG_FILE: &str = "autoblog.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project (or explicit file) → env vars
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let project = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);

        if explicit.is_some() && !project.exists() {
            return Err(AppError::Config(format!(
                "Config file not found: {}",
                project.display()
            )));
        }

        Self::extract(Self::figment(Self::global_config_path(), project))
    }

    /// Load configuration from a specific file only (no global, no env)
    #[cfg(test)]
    fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    /// Build the layered figment from explicit file locations
    pub fn figment(global: Option<PathBuf>, project: PathBuf) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(&project));
        }

        // AUTOBLOG_CMS__PUBLISH_MODE -> cms.publish_mode
        figment.merge(Env::prefixed(env::CONFIG_PREFIX).split("__").lowercase(true))
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| AppError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load `.env` from the working directory (or a parent) if present
    pub fn load_dotenv() {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => warn!("Ignoring unreadable .env file: {}", e),
        }
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "autoblog").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        let dotenv = Path::new(".env");
        let exists = if dotenv.exists() { "✓" } else { "✗" };
        println!("  Secrets: {} {}", exists, dotenv.display());
    }

    /// Show current effective configuration
    pub fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
        let config = Self::load(explicit)?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| AppError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a commented default config; returns the file path
    pub fn init(global: bool, force: bool) -> Result<PathBuf> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                AppError::Config("Cannot determine global config directory".to_string())
            })?
        } else {
            Self::project_config_path()
        };

        Self::write_default(&path, force)?;
        Ok(path)
    }

    fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(())
    }

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# autoblog configuration
# Secrets (GEMINI_API_KEY, WEBFLOW_API_TOKEN, WEBFLOW_COLLECTION_ID)
# belong in the environment or .env, never in this file.

version = "1.0"

[generation]
api_base = "https://generativelanguage.googleapis.com/v1beta"
model = "gemini-flash-latest"
timeout_secs = 60
# "schedule" picks by UTC hour, "random" picks uniformly
category_policy = "schedule"

[cms]
api_base = "https://api.webflow.com/v2"
api_version = "2.0.0"
# "live" publishes immediately, "draft" waits for review
publish_mode = "live"
timeout_secs = 30
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryPolicy, PublishMode};
    use figment::Jail;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_files() {
        Jail::expect_with(|jail| {
            let config = ConfigLoader::extract(ConfigLoader::figment(
                None,
                jail.directory().join("missing.toml"),
            ))
            .map_err(|e| e.to_string())?;
            assert_eq!(config.version, "1.0");
            assert_eq!(config.cms.publish_mode, PublishMode::Live);
            Ok(())
        });
    }

    #[test]
    fn test_project_overrides_global() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                "[generation]\nmodel = \"global-model\"\ncategory_policy = \"random\"\n",
            )?;
            jail.create_file("autoblog.toml", "[generation]\nmodel = \"project-model\"\n")?;

            let config = ConfigLoader::extract(ConfigLoader::figment(
                Some(jail.directory().join("global.toml")),
                jail.directory().join("autoblog.toml"),
            ))
            .map_err(|e| e.to_string())?;

            assert_eq!(config.generation.model, "project-model");
            assert_eq!(config.generation.category_policy, CategoryPolicy::Random);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("autoblog.toml", "[cms]\npublish_mode = \"live\"\n")?;
            jail.set_env("AUTOBLOG_CMS__PUBLISH_MODE", "draft");
            jail.set_env("AUTOBLOG_GENERATION__TIMEOUT_SECS", "15");

            let config = ConfigLoader::extract(ConfigLoader::figment(
                None,
                jail.directory().join("autoblog.toml"),
            ))
            .map_err(|e| e.to_string())?;

            assert_eq!(config.cms.publish_mode, PublishMode::Draft);
            assert_eq!(config.generation.timeout_secs, 15);
            Ok(())
        });
    }

    #[test]
    fn test_draft_flag_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("autoblog.toml", "[cms]\npublish_mode = \"live\"\n")?;

            let mut config = ConfigLoader::extract(ConfigLoader::figment(
                None,
                jail.directory().join("autoblog.toml"),
            ))
            .map_err(|e| e.to_string())?;
            assert_eq!(config.cms.publish_mode, PublishMode::Live);

            config.apply_cli_overrides(true);
            assert_eq!(config.cms.publish_mode, PublishMode::Draft);
            Ok(())
        });
    }

    #[test]
    fn test_missing_draft_flag_keeps_env_draft() {
        Jail::expect_with(|jail| {
            jail.set_env("AUTOBLOG_CMS__PUBLISH_MODE", "draft");

            let mut config = ConfigLoader::extract(ConfigLoader::figment(
                None,
                jail.directory().join("autoblog.toml"),
            ))
            .map_err(|e| e.to_string())?;

            config.apply_cli_overrides(false);
            assert_eq!(config.cms.publish_mode, PublishMode::Draft);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("autoblog.toml", "[cms]\npublish_mode = \"sometimes\"\n")?;
            let result = ConfigLoader::extract(ConfigLoader::figment(
                None,
                jail.directory().join("autoblog.toml"),
            ));
            assert!(matches!(result, Err(AppError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = ConfigLoader::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_default_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        ConfigLoader::write_default(&path, false).unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();

        assert_eq!(config.generation.model, "gemini-flash-latest");
        assert_eq!(config.cms.api_version, "2.0.0");
        assert_eq!(config.cms.timeout_secs, 30);
    }

    #[test]
    fn test_write_default_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("autoblog.toml");
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::write_default(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::write_default(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[generation]"));
    }
}
