//! Transport configuration.
//!
//! The client needs to know the page's origin to resolve path-only API URLs;
//! everything else has defaults matching the deployed service.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured origin.
pub const BASE_URL_ENV: &str = "FRONTDESK_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin the page is served from, e.g. `https://desk.example.com`.
    /// Path-only request URLs are resolved against it.
    pub base_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Build a config from the environment, falling back to `fallback_origin`
    /// when `FRONTDESK_BASE_URL` is unset or empty.
    pub fn from_env(fallback_origin: &str) -> Self {
        if let Ok(base) = env::var(BASE_URL_ENV)
            && !base.is_empty()
        {
            return Self::new(base);
        }
        Self::new(fallback_origin)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
