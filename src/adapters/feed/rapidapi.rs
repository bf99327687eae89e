//! RapidAPI cricket feed - Implementation of CricketFeed over the Cricbuzz API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RapidApiConfig::new(api_key)
//!     .with_base_url("https://cricbuzz-cricket2.p.rapidapi.com")
//!     .with_max_attempts(3);
//!
//! let feed = RapidApiFeed::new(config)?;
//! ```
//!
//! # Rate limits
//!
//! A 429 response waits `backoff` and retries while attempts remain. Every
//! other failure returns immediately.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::feed::{
    parse_rankings, GameFormat, MatchCategory, MatchFeed, RankingCategory, RankingEntry,
};
use crate::ports::{CricketFeed, FeedError};

/// Default RapidAPI host for the Cricbuzz feed.
pub const DEFAULT_API_HOST: &str = "cricbuzz-cricket2.p.rapidapi.com";

/// Configuration for the RapidAPI feed.
#[derive(Debug, Clone)]
pub struct RapidApiConfig {
    api_key: Secret<String>,
    /// Value of the `x-rapidapi-host` header.
    pub api_host: String,
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait between rate-limited attempts.
    pub backoff: Duration,
}

impl RapidApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: format!("https://{}", DEFAULT_API_HOST),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Clamped to at least one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Cricbuzz feed client.
pub struct RapidApiFeed {
    config: RapidApiConfig,
    client: Client,
}

impl RapidApiFeed {
    pub fn new(config: RapidApiConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeedError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn matches_url(&self, category: MatchCategory) -> String {
        format!("{}/matches/v1/{}", self.config.base_url, category)
    }

    fn rankings_url(&self, category: RankingCategory) -> String {
        format!("{}/stats/v1/rankings/{}", self.config.base_url, category)
    }

    async fn send_request(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, FeedError> {
        self.client
            .get(url)
            .header("x-rapidapi-key", self.config.api_key())
            .header("x-rapidapi-host", &self.config.api_host)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::Timeout
                } else if e.is_connect() {
                    FeedError::Network(format!("Connection failed: {}", e))
                } else {
                    FeedError::Network(e.to_string())
                }
            })
    }

    /// Fetches a body, retrying only on 429.
    async fn fetch_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FeedError> {
        let mut attempt = 1;
        loop {
            let response = self.send_request(url, query).await?;
            match Self::handle_response_status(response.status().as_u16()) {
                Ok(()) => {
                    return response
                        .text()
                        .await
                        .map_err(|e| FeedError::Parse(format!("Failed to read body: {}", e)));
                }
                Err(FeedError::RateLimited { .. }) if attempt < self.config.max_attempts => {
                    warn!(url, attempt, "Feed rate limited, retrying");
                    sleep(self.config.backoff).await;
                    attempt += 1;
                }
                Err(FeedError::RateLimited { .. }) => {
                    return Err(FeedError::RateLimited { attempts: attempt });
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn handle_response_status(status: u16) -> Result<(), FeedError> {
        match status {
            200 => Ok(()),
            429 => Err(FeedError::RateLimited { attempts: 0 }),
            other => Err(FeedError::Status(other)),
        }
    }
}

#[async_trait]
impl CricketFeed for RapidApiFeed {
    async fn matches(&self, category: MatchCategory) -> Result<MatchFeed, FeedError> {
        let body = self.fetch_text(&self.matches_url(category), &[]).await?;
        let feed = MatchFeed::from_json(&body).map_err(|e| FeedError::Parse(e.to_string()))?;
        debug!(%category, matches = feed.match_count(), "Fetched matches");
        Ok(feed)
    }

    async fn rankings(
        &self,
        category: RankingCategory,
        format: GameFormat,
    ) -> Result<Vec<RankingEntry>, FeedError> {
        let query = [("isWomen", "0"), ("formatType", format.as_str())];
        let body = self.fetch_text(&self.rankings_url(category), &query).await?;
        let entries = parse_rankings(&body).map_err(|e| FeedError::Parse(e.to_string()))?;
        debug!(%category, %format, entries = entries.len(), "Fetched rankings");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RapidApiConfig::new("key");
        assert_eq!(config.api_host, "cricbuzz-cricket2.p.rapidapi.com");
        assert_eq!(config.base_url, "https://cricbuzz-cricket2.p.rapidapi.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff, Duration::from_secs(1));
    }

    #[test]
    fn max_attempts_is_at_least_one() {
        assert_eq!(RapidApiConfig::new("k").with_max_attempts(0).max_attempts, 1);
    }

    #[test]
    fn urls_follow_the_api_layout() {
        let feed = RapidApiFeed::new(RapidApiConfig::new("k").with_base_url("http://local/")).unwrap();
        assert_eq!(feed.matches_url(MatchCategory::Live), "http://local/matches/v1/live");
        assert_eq!(
            feed.rankings_url(RankingCategory::Bowlers),
            "http://local/stats/v1/rankings/bowlers"
        );
    }

    #[test]
    fn status_mapping() {
        assert!(RapidApiFeed::handle_response_status(200).is_ok());
        assert!(matches!(
            RapidApiFeed::handle_response_status(429),
            Err(FeedError::RateLimited { .. })
        ));
        assert_eq!(RapidApiFeed::handle_response_status(503), Err(FeedError::Status(503)));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = RapidApiConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
