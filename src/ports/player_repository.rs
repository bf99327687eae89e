//! Player repository port.
//!
//! Plain CRUD over the `players` table. Drafts reaching the repository have
//! already been validated.

use async_trait::async_trait;

use crate::domain::foundation::ValidationError;
use crate::domain::player::{Player, PlayerDraft};

/// Repository port for player records.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All players ordered by id.
    async fn list(&self) -> Result<Vec<Player>, PlayerError>;

    /// Find a player by id. Returns `None` if not found.
    async fn find(&self, id: i64) -> Result<Option<Player>, PlayerError>;

    /// Insert a new player and return it with its assigned id.
    async fn create(&self, draft: PlayerDraft) -> Result<Player, PlayerError>;

    /// Replace every field of an existing player.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no player has this id
    async fn update(&self, id: i64, draft: PlayerDraft) -> Result<Player, PlayerError>;

    /// Delete a player.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no player has this id
    async fn delete(&self, id: i64) -> Result<(), PlayerError>;
}

/// Errors from player operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for PlayerError {
    fn from(err: sqlx::Error) -> Self {
        PlayerError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert() {
        let err: PlayerError = ValidationError::empty_field("name").into();
        assert!(matches!(err, PlayerError::Validation(_)));
        assert_eq!(err.to_string(), "Field 'name' cannot be empty");
    }

    #[test]
    fn not_found_names_the_id() {
        assert_eq!(PlayerError::NotFound(7).to_string(), "Player not found: 7");
    }
}
