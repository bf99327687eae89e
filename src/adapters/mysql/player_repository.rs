//! MySQL implementation of PlayerRepository.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use crate::domain::player::{Player, PlayerDraft};
use crate::ports::{PlayerError, PlayerRepository};

/// MySQL-backed player repository over the `players` table.
#[derive(Clone)]
pub struct MySqlPlayerRepository {
    pool: MySqlPool,
}

impl MySqlPlayerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for MySqlPlayerRepository {
    async fn list(&self) -> Result<Vec<Player>, PlayerError> {
        let rows = sqlx::query(
            "SELECT id, name, team, matches, runs, wickets FROM players ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_player).collect()
    }

    async fn find(&self, id: i64) -> Result<Option<Player>, PlayerError> {
        let row = sqlx::query(
            "SELECT id, name, team, matches, runs, wickets FROM players WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_player).transpose()
    }

    async fn create(&self, draft: PlayerDraft) -> Result<Player, PlayerError> {
        let result = sqlx::query(
            "INSERT INTO players (name, team, matches, runs, wickets) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.team)
        .bind(draft.matches)
        .bind(draft.runs)
        .bind(draft.wickets)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| PlayerError::Database(format!("Invalid insert id: {}", e)))?;
        Ok(Player::from_draft(id, draft))
    }

    async fn update(&self, id: i64, draft: PlayerDraft) -> Result<Player, PlayerError> {
        let result = sqlx::query(
            r#"
            UPDATE players SET
                name = ?, team = ?, matches = ?, runs = ?, wickets = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.team)
        .bind(draft.matches)
        .bind(draft.runs)
        .bind(draft.wickets)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // MySQL counts changed rows, so an identical update also reports 0
        if result.rows_affected() == 0 && self.find(id).await?.is_none() {
            return Err(PlayerError::NotFound(id));
        }

        Ok(Player::from_draft(id, draft))
    }

    async fn delete(&self, id: i64) -> Result<(), PlayerError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PlayerError::NotFound(id));
        }
        Ok(())
    }
}

fn row_to_player(row: &MySqlRow) -> Result<Player, PlayerError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| PlayerError::Database(format!("Failed to get id: {}", e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| PlayerError::Database(format!("Failed to get name: {}", e)))?;
    let team: Option<String> = row
        .try_get("team")
        .map_err(|e| PlayerError::Database(format!("Failed to get team: {}", e)))?;

    Ok(Player {
        id,
        name,
        team: team.unwrap_or_default(),
        matches: count(row, "matches")?,
        runs: count(row, "runs")?,
        wickets: count(row, "wickets")?,
    })
}

fn count(row: &MySqlRow, column: &str) -> Result<u32, PlayerError> {
    let value: Option<i64> = row
        .try_get(column)
        .map_err(|e| PlayerError::Database(format!("Failed to get {}: {}", column, e)))?;
    u32::try_from(value.unwrap_or(0))
        .map_err(|_| PlayerError::Database(format!("Column {} out of range", column)))
}
