//! HTTP routes for feed endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_matches, get_rankings, FeedAppState};

pub fn feed_routes(state: FeedAppState) -> Router {
    Router::new()
        .route("/api/matches/:category", get(get_matches))
        .route("/api/rankings/:category/:format", get(get_rankings))
        .with_state(state)
}
