//! HTTP routes for analytics endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{export_question_csv, run_analytics, AnalyticsAppState};

/// Creates the analytics router with all routes.
pub fn analytics_routes(state: AnalyticsAppState) -> Router {
    Router::new()
        // GET /api/analytics
        .route("/api/analytics", get(run_analytics))
        // GET /api/analytics/:ordinal/csv
        .route("/api/analytics/:ordinal/csv", get(export_question_csv))
        .with_state(state)
}
