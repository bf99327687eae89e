//! MySQL implementation of TableSource.
//!
//! Reads whole tables with `SELECT *` and decodes each cell into a `Value`
//! by trying the supported Rust types in a fixed order.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, MySqlPool, Row};
use tracing::debug;

use crate::domain::table::{LogicalTable, Value};
use crate::ports::{StoreError, TableSource};

/// MySQL-backed table source.
#[derive(Clone)]
pub struct MySqlTableSource {
    pool: MySqlPool,
}

impl MySqlTableSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let pattern = name.replace('_', "\\_");
        let found = sqlx::query("SHOW TABLES LIKE ?")
            .bind(pattern)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::query(name, e))?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl TableSource for MySqlTableSource {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn load_table(
        &self,
        name: &str,
        row_cap: usize,
    ) -> Result<Option<LogicalTable>, StoreError> {
        if !is_valid_table_name(name) || !self.table_exists(name).await? {
            return Ok(None);
        }

        // Identifier already restricted to [A-Za-z0-9_]
        let sql = format!("SELECT * FROM `{}` LIMIT {}", name, row_cap);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query(name, e))?;
        debug!(table = name, rows = rows.len(), "Loaded table");

        rows_to_table(&rows).map(Some)
    }
}

/// Only plain identifiers are ever interpolated into SQL.
pub(crate) fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn rows_to_table(rows: &[MySqlRow]) -> Result<LogicalTable, StoreError> {
    let Some(first) = rows.first() else {
        return Ok(LogicalTable::new());
    };
    let names: Vec<String> = first.columns().iter().map(|c| c.name().to_string()).collect();

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            cells.push(decode_cell(row, index, name)?);
        }
        data.push(cells);
    }

    LogicalTable::from_rows(&names, data).map_err(|e| StoreError::decode("*", e))
}

fn decode_cell(row: &MySqlRow, index: usize, column: &str) -> Result<Value, StoreError> {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.into());
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return Ok(match v {
            Some(n) => i64::try_from(n).map(Value::Int).unwrap_or(Value::float(n as f64)),
            None => Value::Null,
        });
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.into());
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(index) {
        return Ok(v.map(f64::from).into());
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(index) {
        return Ok(v.into());
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(index) {
        return Ok(v.into());
    }
    if let Ok(v) = row.try_get::<Option<NaiveDate>, _>(index) {
        return Ok(v.into());
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v.into());
    }
    // DECIMAL and other textual wire types
    row.try_get_unchecked::<Option<String>, _>(index)
        .map(Value::from)
        .map_err(|e| StoreError::decode(column, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_are_valid() {
        assert!(is_valid_table_name("players"));
        assert!(is_valid_table_name("player_stats_2024"));
    }

    #[test]
    fn anything_else_is_rejected() {
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("players; DROP TABLE x"));
        assert!(!is_valid_table_name("a`b"));
        assert!(!is_valid_table_name("db.players"));
    }
}
