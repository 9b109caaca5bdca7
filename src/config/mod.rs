//! Configuration Management
//!
//! Hierarchical resolution of non-secret settings:
//! 1. Built-in defaults
//! 2. Global config (<config dir>/autoblog/config.toml)
//! 3. Project config (./autoblog.toml)
//! 4. Environment variables (AUTOBLOG_*)
//! 5. CLI arguments (highest priority)
//!
//! Secrets come from the environment only, optionally seeded from `.env`.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
