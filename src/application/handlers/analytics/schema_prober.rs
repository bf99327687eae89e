//! SchemaProber - Builds the table registry for one batch run.
//!
//! Each logical table is loaded under its canonical name first, then under
//! its aliases. A failed or missing spelling moves on to the next one, and a
//! logical table with no loadable spelling is simply absent. Only an
//! unreachable store fails the probe.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::table::{LogicalName, LogicalTable, TableRegistry};
use crate::ports::{StoreError, TableSource};

/// Default maximum rows loaded per table.
pub const DEFAULT_ROW_CAP: usize = 100_000;

/// Default number of logical tables loaded at once.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 4;

/// Errors that abort a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("data store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Loads every logical table from a `TableSource`.
#[derive(Clone)]
pub struct SchemaProber {
    source: Arc<dyn TableSource>,
    row_cap: usize,
    concurrency: usize,
}

impl SchemaProber {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self {
            source,
            row_cap: DEFAULT_ROW_CAP,
            concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }

    pub fn with_row_cap(mut self, row_cap: usize) -> Self {
        self.row_cap = row_cap;
        self
    }

    /// Clamped to at least one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Loads one logical table, trying each spelling in order.
    pub async fn load(&self, name: LogicalName) -> Option<LogicalTable> {
        for spelling in name.spellings() {
            match self.source.load_table(spelling, self.row_cap).await {
                Ok(Some(table)) => {
                    if spelling != name.canonical() {
                        warn!(logical = %name, physical = spelling, "Loaded table under alias");
                    }
                    debug!(logical = %name, rows = table.row_count(), "Probed table");
                    return Some(table);
                }
                Ok(None) => continue,
                Err(err) => {
                    debug!(logical = %name, physical = spelling, error = %err, "Table load failed");
                }
            }
        }
        debug!(logical = %name, "Table absent");
        None
    }

    /// Pings the store, then loads all logical tables into a registry.
    pub async fn probe(&self, as_of: NaiveDate) -> Result<TableRegistry, ProbeError> {
        self.source.ping().await.map_err(ProbeError::StoreUnavailable)?;

        let loaded: Vec<(LogicalName, Option<LogicalTable>)> = stream::iter(LogicalName::ALL)
            .map(|name| async move { (name, self.load(name).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut registry = TableRegistry::new(as_of);
        for (name, table) in loaded {
            if let Some(table) = table {
                registry.insert(name, table);
            }
        }
        info!(present = registry.present().len(), "Schema probe complete");
        Ok(registry)
    }
}
