//! Players HTTP adapter module.
//!
//! CRUD over player statistics records. Request bodies are `PlayerDraft`
//! JSON; counts are unsigned so negative values are rejected by the
//! extractor.

pub mod handlers;
pub mod routes;

pub use handlers::PlayersAppState;
pub use routes::players_routes;
