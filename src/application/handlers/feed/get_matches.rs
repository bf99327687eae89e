//! GetMatchesHandler - Query handler for live, recent, and upcoming matches.

use std::sync::Arc;

use tracing::warn;

use crate::domain::feed::{MatchCategory, MatchFeed};
use crate::ports::{CricketFeed, FeedError};

/// Query for one match listing.
#[derive(Debug, Clone, Copy)]
pub struct GetMatchesQuery {
    pub category: MatchCategory,
}

pub struct GetMatchesHandler {
    feed: Arc<dyn CricketFeed>,
}

impl GetMatchesHandler {
    pub fn new(feed: Arc<dyn CricketFeed>) -> Self {
        Self { feed }
    }

    pub async fn handle(&self, query: GetMatchesQuery) -> Result<MatchFeed, FeedError> {
        self.feed.matches(query.category).await.map_err(|err| {
            warn!(category = %query.category, error = %err, "Match feed request failed");
            err
        })
    }
}
