//! Cricket feed port - live listings and rankings from the upstream sports API.

use async_trait::async_trait;

use crate::domain::feed::{GameFormat, MatchCategory, MatchFeed, RankingCategory, RankingEntry};

/// Port for the upstream cricket data feed.
#[async_trait]
pub trait CricketFeed: Send + Sync {
    /// Fetches live, recent, or upcoming matches grouped by type and series.
    async fn matches(&self, category: MatchCategory) -> Result<MatchFeed, FeedError>;

    /// Fetches the top ranked players for a category and format.
    async fn rankings(
        &self,
        category: RankingCategory,
        format: GameFormat,
    ) -> Result<Vec<RankingEntry>, FeedError>;
}

/// Errors from feed operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Still rate limited after the retry budget was spent.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Non-success status other than 429.
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("parse error: {0}")]
    Parse(String),
}

impl FeedError {
    /// Whether a later call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FeedError::RateLimited { .. } | FeedError::Network(_) | FeedError::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_reports_attempts() {
        let err = FeedError::RateLimited { attempts: 3 };
        assert_eq!(err.to_string(), "rate limited after 3 attempts");
        assert!(err.is_transient());
    }

    #[test]
    fn status_and_parse_errors_are_not_transient() {
        assert!(!FeedError::Status(404).is_transient());
        assert!(!FeedError::Parse("bad".into()).is_transient());
    }
}
