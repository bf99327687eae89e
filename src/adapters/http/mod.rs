//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! `api_router` merges them behind a shared health route.

pub mod analytics;
pub mod dto;
pub mod feed;
pub mod players;

use axum::routing::get;
use axum::Router;

pub use analytics::{analytics_routes, AnalyticsAppState};
pub use dto::ErrorResponse;
pub use feed::{feed_routes, FeedAppState};
pub use players::{players_routes, PlayersAppState};

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Creates the full API router.
pub fn api_router(
    analytics: AnalyticsAppState,
    feed: FeedAppState,
    players: PlayersAppState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(analytics_routes(analytics))
        .merge(feed_routes(feed))
        .merge(players_routes(players))
}
