//! HTTP routes for player endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    create_player, delete_player, get_player, list_players, update_player, PlayersAppState,
};

pub fn players_routes(state: PlayersAppState) -> Router {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route(
            "/api/players/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
        .with_state(state)
}
