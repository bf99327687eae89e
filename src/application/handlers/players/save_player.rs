//! Player command handlers - create, update, and delete.
//!
//! Drafts are validated here so every repository sees trimmed, bounded names.

use std::sync::Arc;

use tracing::info;

use crate::domain::player::{Player, PlayerDraft};
use crate::ports::{PlayerError, PlayerRepository};

/// Command to create a player.
#[derive(Debug, Clone)]
pub struct CreatePlayerCommand {
    pub draft: PlayerDraft,
}

pub struct CreatePlayerHandler {
    repository: Arc<dyn PlayerRepository>,
}

impl CreatePlayerHandler {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreatePlayerCommand) -> Result<Player, PlayerError> {
        let draft = cmd.draft.validate()?;
        let player = self.repository.create(draft).await?;
        info!(player_id = player.id, "Player created");
        Ok(player)
    }
}

/// Command to replace a player's fields.
#[derive(Debug, Clone)]
pub struct UpdatePlayerCommand {
    pub id: i64,
    pub draft: PlayerDraft,
}

pub struct UpdatePlayerHandler {
    repository: Arc<dyn PlayerRepository>,
}

impl UpdatePlayerHandler {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdatePlayerCommand) -> Result<Player, PlayerError> {
        let draft = cmd.draft.validate()?;
        let player = self.repository.update(cmd.id, draft).await?;
        info!(player_id = player.id, "Player updated");
        Ok(player)
    }
}

/// Command to delete a player.
#[derive(Debug, Clone, Copy)]
pub struct DeletePlayerCommand {
    pub id: i64,
}

pub struct DeletePlayerHandler {
    repository: Arc<dyn PlayerRepository>,
}

impl DeletePlayerHandler {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeletePlayerCommand) -> Result<(), PlayerError> {
        self.repository.delete(cmd.id).await?;
        info!(player_id = cmd.id, "Player deleted");
        Ok(())
    }
}
