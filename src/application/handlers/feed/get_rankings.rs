//! GetRankingsHandler - Query handler for top-10 player rankings.

use std::sync::Arc;

use tracing::warn;

use crate::domain::feed::{GameFormat, RankingCategory, RankingEntry};
use crate::ports::{CricketFeed, FeedError};

/// Query for one rankings table.
#[derive(Debug, Clone, Copy)]
pub struct GetRankingsQuery {
    pub category: RankingCategory,
    pub format: GameFormat,
}

pub struct GetRankingsHandler {
    feed: Arc<dyn CricketFeed>,
}

impl GetRankingsHandler {
    pub fn new(feed: Arc<dyn CricketFeed>) -> Self {
        Self { feed }
    }

    pub async fn handle(&self, query: GetRankingsQuery) -> Result<Vec<RankingEntry>, FeedError> {
        self.feed
            .rankings(query.category, query.format)
            .await
            .map_err(|err| {
                warn!(
                    category = %query.category,
                    format = %query.format,
                    error = %err,
                    "Rankings request failed"
                );
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::{MatchCategory, MatchFeed, Trend};
    use async_trait::async_trait;

    struct MockFeed;

    #[async_trait]
    impl CricketFeed for MockFeed {
        async fn matches(&self, _category: MatchCategory) -> Result<MatchFeed, FeedError> {
            unimplemented!()
        }

        async fn rankings(
            &self,
            category: RankingCategory,
            format: GameFormat,
        ) -> Result<Vec<RankingEntry>, FeedError> {
            if format == GameFormat::Test {
                return Err(FeedError::Status(500));
            }
            Ok(vec![RankingEntry {
                rank: 1,
                name: format!("{}-{}", category, format),
                country: "India".to_string(),
                rating: Some(900),
                trend: Trend::Flat,
            }])
        }
    }

    #[tokio::test]
    async fn passes_category_and_format_through() {
        let handler = GetRankingsHandler::new(Arc::new(MockFeed));
        let entries = handler
            .handle(GetRankingsQuery {
                category: RankingCategory::Batsmen,
                format: GameFormat::Odi,
            })
            .await
            .unwrap();
        assert_eq!(entries[0].name, "batsmen-odi");
    }

    #[tokio::test]
    async fn surfaces_status_errors() {
        let handler = GetRankingsHandler::new(Arc::new(MockFeed));
        let result = handler
            .handle(GetRankingsQuery {
                category: RankingCategory::Bowlers,
                format: GameFormat::Test,
            })
            .await;
        assert_eq!(result, Err(FeedError::Status(500)));
    }
}
