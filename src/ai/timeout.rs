//! Unified Timeout Configuration
//!
//! Every remote call is bounded twice: by the reqwest client timeout and by
//! an outer `with_timeout` guard that also covers body reads.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::{TimeoutConfig, with_timeout};
//!
//! let config = TimeoutConfig::from_config(&config);
//! let text = with_timeout(
//!     config.generation,
//!     async { /* generateContent call */ },
//!     "generateContent",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::constants::network as net_constants;
use crate::types::TimeoutError;

/// Timeouts for each remote call
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Generation requests (default: 60 seconds)
    pub generation: Duration,
    /// CMS requests (default: 30 seconds)
    pub publish: Duration,
    /// TCP connect for either endpoint (default: 10 seconds)
    pub connection: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            generation: Duration::from_secs(net_constants::GENERATION_TIMEOUT_SECS),
            publish: Duration::from_secs(net_constants::PUBLISH_TIMEOUT_SECS),
            connection: Duration::from_secs(net_constants::CONNECTION_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generation: config.generation.timeout(),
            publish: config.cms.timeout(),
            ..Self::default()
        }
    }
}

/// Execute an async operation with a timeout
///
/// Returns the error type's timeout variant if the operation doesn't
/// complete within `timeout`.
pub async fn with_timeout<T, E, F>(
    timeout: Duration,
    future: F,
    operation_name: &str,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: TimeoutError,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(E::timeout(operation_name, timeout)),
    }
}
