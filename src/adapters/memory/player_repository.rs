//! In-Memory Player Repository Adapter

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::player::{Player, PlayerDraft};
use crate::ports::{PlayerError, PlayerRepository};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    players: BTreeMap<i64, Player>,
}

/// In-memory player repository with auto-increment ids starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayerRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn list(&self) -> Result<Vec<Player>, PlayerError> {
        Ok(self.store.read().await.players.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Player>, PlayerError> {
        Ok(self.store.read().await.players.get(&id).cloned())
    }

    async fn create(&self, draft: PlayerDraft) -> Result<Player, PlayerError> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let player = Player::from_draft(store.next_id, draft);
        store.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn update(&self, id: i64, draft: PlayerDraft) -> Result<Player, PlayerError> {
        let mut store = self.store.write().await;
        let slot = store.players.get_mut(&id).ok_or(PlayerError::NotFound(id))?;
        *slot = Player::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), PlayerError> {
        self.store
            .write()
            .await
            .players
            .remove(&id)
            .map(|_| ())
            .ok_or(PlayerError::NotFound(id))
    }
}
