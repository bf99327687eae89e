//! Player query handlers.

use std::sync::Arc;

use crate::domain::player::Player;
use crate::ports::{PlayerError, PlayerRepository};

pub struct ListPlayersHandler {
    repository: Arc<dyn PlayerRepository>,
}

impl ListPlayersHandler {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Player>, PlayerError> {
        self.repository.list().await
    }
}

/// Query for a single player.
#[derive(Debug, Clone, Copy)]
pub struct GetPlayerQuery {
    pub id: i64,
}

pub struct GetPlayerHandler {
    repository: Arc<dyn PlayerRepository>,
}

impl GetPlayerHandler {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// Missing players are `NotFound` rather than `None`.
    pub async fn handle(&self, query: GetPlayerQuery) -> Result<Player, PlayerError> {
        self.repository
            .find(query.id)
            .await?
            .ok_or(PlayerError::NotFound(query.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPlayerRepository;
    use crate::domain::player::PlayerDraft;

    #[tokio::test]
    async fn get_missing_player_is_not_found() {
        let handler = GetPlayerHandler::new(Arc::new(InMemoryPlayerRepository::new()));
        let result = handler.handle(GetPlayerQuery { id: 3 }).await;
        assert!(matches!(result, Err(PlayerError::NotFound(3))));
    }

    #[tokio::test]
    async fn list_returns_created_players() {
        let repo = Arc::new(InMemoryPlayerRepository::new());
        repo.create(PlayerDraft {
            name: "Smriti Mandhana".to_string(),
            team: "India".to_string(),
            matches: 80,
            runs: 3000,
            wickets: 0,
        })
        .await
        .unwrap();

        let players = ListPlayersHandler::new(repo).handle().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Smriti Mandhana");
    }
}
