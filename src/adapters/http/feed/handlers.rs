//! HTTP handlers for live match and rankings endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::dto::ErrorResponse;
use crate::application::handlers::{
    GetMatchesHandler, GetMatchesQuery, GetRankingsHandler, GetRankingsQuery,
};
use crate::domain::feed::{GameFormat, MatchCategory, MatchFeed, RankingCategory, RankingEntry};
use crate::domain::foundation::ValidationError;
use crate::ports::{CricketFeed, FeedError};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum FeedApiError {
    BadRequest(String),
    RateLimited(String),
    Upstream(String),
}

impl IntoResponse for FeedApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            FeedApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            FeedApiError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, ErrorResponse::rate_limited(msg))
            }
            FeedApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, ErrorResponse::bad_gateway(msg)),
        };
        (status, Json(error)).into_response()
    }
}

impl From<FeedError> for FeedApiError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::RateLimited { .. } => FeedApiError::RateLimited(error.to_string()),
            other => FeedApiError::Upstream(other.to_string()),
        }
    }
}

impl From<ValidationError> for FeedApiError {
    fn from(error: ValidationError) -> Self {
        FeedApiError::BadRequest(error.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FeedAppState {
    pub feed: Arc<dyn CricketFeed>,
}

impl FeedAppState {
    pub fn get_matches_handler(&self) -> GetMatchesHandler {
        GetMatchesHandler::new(self.feed.clone())
    }

    pub fn get_rankings_handler(&self) -> GetRankingsHandler {
        GetRankingsHandler::new(self.feed.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/matches/:category
pub async fn get_matches(
    State(state): State<FeedAppState>,
    Path(category): Path<String>,
) -> Result<Json<MatchFeed>, FeedApiError> {
    let category: MatchCategory = category.parse()?;
    let feed = state
        .get_matches_handler()
        .handle(GetMatchesQuery { category })
        .await?;
    Ok(Json(feed))
}

/// GET /api/rankings/:category/:format
pub async fn get_rankings(
    State(state): State<FeedAppState>,
    Path((category, format)): Path<(String, String)>,
) -> Result<Json<Vec<RankingEntry>>, FeedApiError> {
    let category: RankingCategory = category.parse()?;
    let format: GameFormat = format.parse()?;
    let entries = state
        .get_rankings_handler()
        .handle(GetRankingsQuery { category, format })
        .await?;
    Ok(Json(entries))
}
