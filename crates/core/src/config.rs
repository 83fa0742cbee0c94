//! Store Configuration Types
//!
//! Data types for configuring the remote template store connection. These
//! are shared across the store client and the application services. The
//! actual HTTP client factory is in the `aiscale-store` crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default backend URL used by the development deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the store base URL.
pub const BASE_URL_ENV: &str = "AISCALE_BASE_URL";

/// Environment variable overriding the per-request timeout (seconds).
pub const TIMEOUT_ENV: &str = "AISCALE_TIMEOUT_SECS";

/// Default per-request timeout in seconds.
///
/// The transport's own defaults are effectively unbounded; every request
/// carries this explicit timeout so a hung save surfaces as a failure
/// instead of leaving the UI disabled forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote template store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the template store backend (no trailing slash).
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl StoreConfig {
    /// Create a config pointing at the given base URL, with default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a full endpoint URL from a path starting with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a config from `AISCALE_BASE_URL` / `AISCALE_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_parts(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn from_parts(base_url: Option<String>, timeout: Option<String>) -> CoreResult<Self> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(CoreError::config(format!(
                "{} must not be empty",
                BASE_URL_ENV
            )));
        }
        let mut config = Self::new(base_url);
        if let Some(raw) = timeout {
            config.timeout_secs = raw.parse().map_err(|_| {
                CoreError::config(format!(
                    "{} must be a number of seconds, got '{}'",
                    TIMEOUT_ENV, raw
                ))
            })?;
        }
        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
