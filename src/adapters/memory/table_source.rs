//! In-Memory Table Source Adapter
//!
//! Serves fixture tables by physical name. Used by tests and for running the
//! dashboard without a database.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::table::LogicalTable;
use crate::ports::{StoreError, TableSource};

/// In-memory table source with switchable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableSource {
    tables: Arc<RwLock<HashMap<String, LogicalTable>>>,
    denied: Arc<RwLock<HashSet<String>>>,
    offline: Arc<RwLock<bool>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl InMemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    pub fn with_table(self, name: impl Into<String>, table: LogicalTable) -> Self {
        if let Ok(mut tables) = self.tables.try_write() {
            tables.insert(name.into(), table);
        }
        self
    }

    pub async fn insert(&self, name: impl Into<String>, table: LogicalTable) {
        self.tables.write().await.insert(name.into(), table);
    }

    /// Loads of this name fail with a query error.
    pub async fn deny(&self, name: impl Into<String>) {
        self.denied.write().await.insert(name.into());
    }

    /// Makes `ping` fail.
    pub async fn set_offline(&self, offline: bool) {
        *self.offline.write().await = offline;
    }

    /// Names requested through `load_table`, in call order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl TableSource for InMemoryTableSource {
    async fn ping(&self) -> Result<(), StoreError> {
        if *self.offline.read().await {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    async fn load_table(
        &self,
        name: &str,
        row_cap: usize,
    ) -> Result<Option<LogicalTable>, StoreError> {
        self.requests.write().await.push(name.to_string());

        if self.denied.read().await.contains(name) {
            return Err(StoreError::query(name, "access denied"));
        }

        let tables = self.tables.read().await;
        Ok(tables.get(name).map(|table| {
            let mut table = table.clone();
            table.truncate(row_cap);
            table
        }))
    }
}
