//! Live match listings and player rankings from the upstream sports feed.

mod matches;
mod rankings;

pub use matches::{MatchCategory, MatchFeed, MatchSummary, MatchTypeGroup, SeriesMatches};
pub use rankings::{parse_rankings, GameFormat, RankingCategory, RankingEntry, Trend, RANKING_LIMIT};
