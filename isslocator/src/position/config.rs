//! Configuration for the position fetch client.

use std::time::Duration;

use crate::config::ConfigFile;

/// Default position endpoint (ISS, NORAD catalogue number 25544).
pub const DEFAULT_POSITION_URL: &str = "https://api.wheretheiss.at/v1/satellites/25544.json";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent sent with every request.
pub fn default_user_agent() -> String {
    format!("isslocator/{}", crate::VERSION)
}

/// Transport settings for a position client.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionClientConfig {
    /// Endpoint returning a JSON object with `latitude` and `longitude`.
    pub url: String,

    /// Timeout for a single request, connect through body.
    pub timeout: Duration,

    /// User-Agent header value.
    pub user_agent: String,
}

impl PositionClientConfig {
    /// Create a config for a custom endpoint with default transport settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client config from the `[source]` section of the config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            url: config.source.url.clone(),
            timeout: Duration::from_secs(config.source.timeout),
            user_agent: config.source.user_agent.clone(),
        }
    }
}

impl Default for PositionClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_POSITION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}
