//! Table source port - read access to the relational store.
//!
//! The analytics batch never writes. A source answers two questions: is the
//! store reachable at all, and what rows does a physical table hold.

use async_trait::async_trait;

use crate::domain::table::LogicalTable;

/// Port for loading physical tables by name.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Checks connectivity. A failure here aborts the whole batch.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Loads up to `row_cap` rows of the named physical table.
    ///
    /// Returns `Ok(None)` when no table with that name exists.
    async fn load_table(&self, name: &str, row_cap: usize)
        -> Result<Option<LogicalTable>, StoreError>;
}

/// Errors raised by table sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed on table '{table}': {message}")]
    Query { table: String, message: String },

    #[error("cannot decode column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl StoreError {
    pub fn query(table: impl Into<String>, message: impl ToString) -> Self {
        StoreError::Query {
            table: table.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(column: impl Into<String>, message: impl ToString) -> Self {
        StoreError::Decode {
            column: column.into(),
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
