//! Cricket feed configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::feed::{RapidApiConfig, DEFAULT_API_HOST};

/// RapidAPI feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// RapidAPI key
    pub api_key: Option<Secret<String>>,

    /// Value sent as `x-rapidapi-host`
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Base URL; defaults to `https://{api_host}`
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Total attempts per request when rate limited
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait between rate-limited attempts in milliseconds
    #[serde(default = "default_backoff")]
    pub backoff_ms: u64,
}

impl FeedConfig {
    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.api_host))
    }

    /// Builds the adapter configuration.
    pub fn rapidapi_config(&self) -> RapidApiConfig {
        let key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().clone())
            .unwrap_or_default();
        RapidApiConfig::new(key)
            .with_api_host(self.api_host.clone())
            .with_base_url(self.base_url())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_attempts(self.max_attempts)
            .with_backoff(Duration::from_millis(self.backoff_ms))
    }

    /// Validate feed configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(ValidationError::InvalidRetryBudget);
        }
        let base = self.base_url();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ValidationError::InvalidFeedUrl);
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: default_api_host(),
            base_url: None,
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff(),
        }
    }
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_defaults() {
        let config = FeedConfig::default();
        assert!(!config.has_api_key());
        assert_eq!(config.base_url(), "https://cricbuzz-cricket2.p.rapidapi.com");
        assert!(config.validate().is_ok());

        let adapter = config.rapidapi_config();
        assert_eq!(adapter.max_attempts, 3);
        assert_eq!(adapter.backoff, Duration::from_secs(1));
        assert_eq!(adapter.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = FeedConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_validation_retry_budget() {
        let config = FeedConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRetryBudget));
    }

    #[test]
    fn test_validation_base_url() {
        let config = FeedConfig {
            base_url: Some("ftp://feed".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidFeedUrl));
    }
}
