//! Configuration types for the `cf-ops` tool.
//!
//! These structs map to the `cf-ops.yaml` file. Every section is optional;
//! environment variables fill in or override what the file leaves out.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::{RestClient, RestClientBuilder, DEFAULT_TIMEOUT_SECS};
use crate::operations::{PollingConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_TIMEOUT_SECS};

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpsConfig {
    /// Platform endpoints.
    #[serde(default)]
    pub api: ApiConfig,
    /// Targeted organization and space.
    #[serde(default)]
    pub target: TargetConfig,
    /// Job polling policy.
    #[serde(default)]
    pub polling: PollingSettings,
}

/// Platform endpoints and connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Cloud controller root URL.
    #[serde(default)]
    pub url: String,
    /// UAA root URL.
    #[serde(default)]
    pub uaa_url: Option<String>,
    /// Log cache root URL.
    #[serde(default)]
    pub log_cache_url: Option<String>,
    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub skip_ssl_validation: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            uaa_url: None,
            log_cache_url: None,
            skip_ssl_validation: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Returns a client builder preconfigured with these settings.
    #[must_use]
    pub fn client_builder(&self) -> RestClientBuilder {
        let mut builder = RestClient::builder(&self.url)
            .timeout_secs(self.timeout_secs)
            .skip_ssl_validation(self.skip_ssl_validation);
        if let Some(url) = &self.uaa_url {
            builder = builder.uaa_url(url);
        }
        if let Some(url) = &self.log_cache_url {
            builder = builder.log_cache_url(url);
        }
        builder
    }
}

/// The targeted organization and space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Organization name, informational.
    #[serde(default)]
    pub organization: Option<String>,
    /// Space name, informational.
    #[serde(default)]
    pub space: Option<String>,
    /// Space identifier used by the operations.
    #[serde(default)]
    pub space_id: Option<String>,
}

/// How background jobs are polled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollingSettings {
    /// Wait between polls in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Overall timeout in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl From<PollingSettings> for PollingConfig {
    fn from(settings: PollingSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.interval_ms),
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_poll_timeout_secs() -> u64 {
    DEFAULT_POLL_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: OpsConfig = serde_yaml::from_str("{}").expect("empty config parses");
        assert!(config.api.url.is_empty());
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.polling.timeout_secs, 300);
        assert!(config.target.space_id.is_none());
    }

    #[test]
    fn test_polling_conversion() {
        let settings = PollingSettings {
            interval_ms: 250,
            timeout_secs: 10,
        };
        let polling = PollingConfig::from(settings);
        assert_eq!(polling.interval, Duration::from_millis(250));
        assert_eq!(polling.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_builder() {
        let api = ApiConfig {
            url: String::from("https://api.example.com"),
            uaa_url: Some(String::from("https://uaa.example.com")),
            ..ApiConfig::default()
        };
        let client = api.client_builder().build().expect("client builds");
        assert_eq!(client.api_url().as_str(), "https://api.example.com/");
    }
}
