//! HTTP handlers for player CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::dto::ErrorResponse;
use crate::application::handlers::{
    CreatePlayerCommand, CreatePlayerHandler, DeletePlayerCommand, DeletePlayerHandler,
    GetPlayerHandler, GetPlayerQuery, ListPlayersHandler, UpdatePlayerCommand,
    UpdatePlayerHandler,
};
use crate::domain::player::{Player, PlayerDraft};
use crate::ports::{PlayerError, PlayerRepository};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum PlayersApiError {
    BadRequest(ErrorResponse),
    NotFound(i64),
    Internal(String),
}

impl IntoResponse for PlayersApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            PlayersApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            PlayersApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Player", &id.to_string()))
            }
            PlayersApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<PlayerError> for PlayersApiError {
    fn from(error: PlayerError) -> Self {
        match error {
            PlayerError::NotFound(id) => PlayersApiError::NotFound(id),
            PlayerError::Validation(err) => PlayersApiError::BadRequest(
                ErrorResponse::bad_request(err.to_string())
                    .with_details(serde_json::json!({ "field": err.field() })),
            ),
            PlayerError::Database(msg) => {
                PlayersApiError::Internal(format!("Database error: {}", msg))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlayersAppState {
    pub repository: Arc<dyn PlayerRepository>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/players
pub async fn list_players(
    State(state): State<PlayersAppState>,
) -> Result<Json<Vec<Player>>, PlayersApiError> {
    let players = ListPlayersHandler::new(state.repository).handle().await?;
    Ok(Json(players))
}

/// GET /api/players/:id
pub async fn get_player(
    State(state): State<PlayersAppState>,
    Path(id): Path<i64>,
) -> Result<Json<Player>, PlayersApiError> {
    let player = GetPlayerHandler::new(state.repository)
        .handle(GetPlayerQuery { id })
        .await?;
    Ok(Json(player))
}

/// POST /api/players
pub async fn create_player(
    State(state): State<PlayersAppState>,
    Json(draft): Json<PlayerDraft>,
) -> Result<(StatusCode, Json<Player>), PlayersApiError> {
    let player = CreatePlayerHandler::new(state.repository)
        .handle(CreatePlayerCommand { draft })
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// PUT /api/players/:id
pub async fn update_player(
    State(state): State<PlayersAppState>,
    Path(id): Path<i64>,
    Json(draft): Json<PlayerDraft>,
) -> Result<Json<Player>, PlayersApiError> {
    let player = UpdatePlayerHandler::new(state.repository)
        .handle(UpdatePlayerCommand { id, draft })
        .await?;
    Ok(Json(player))
}

/// DELETE /api/players/:id
pub async fn delete_player(
    State(state): State<PlayersAppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, PlayersApiError> {
    DeletePlayerHandler::new(state.repository)
        .handle(DeletePlayerCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
