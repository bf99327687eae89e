//! RunAnalyticsHandler - Probes the store and runs the full question catalog.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::domain::analytics::{BatchReport, BatchRunner};

use super::schema_prober::{ProbeError, SchemaProber};

/// Query to run the analytics batch.
#[derive(Debug, Clone, Default)]
pub struct RunAnalyticsQuery {
    /// Reference date for time-windowed questions. Defaults to today (UTC).
    pub as_of: Option<NaiveDate>,
}

/// Handler for running every analytics question once.
pub struct RunAnalyticsHandler {
    prober: SchemaProber,
    runner: Arc<BatchRunner>,
}

impl RunAnalyticsHandler {
    pub fn new(prober: SchemaProber, runner: Arc<BatchRunner>) -> Self {
        Self { prober, runner }
    }

    pub async fn handle(&self, query: RunAnalyticsQuery) -> Result<BatchReport, ProbeError> {
        let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let registry = self.prober.probe(as_of).await?;
        let report = self.runner.run_all_concurrent(Arc::new(registry)).await;
        info!(
            entries = report.len(),
            placeholders = report.placeholder_count(),
            "Analytics batch finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTableSource;
    use crate::domain::table::{LogicalTable, Value};

    fn handler(source: InMemoryTableSource) -> RunAnalyticsHandler {
        RunAnalyticsHandler::new(SchemaProber::new(Arc::new(source)), Arc::new(BatchRunner::new()))
    }

    #[tokio::test]
    async fn empty_store_yields_all_placeholders() {
        let report = handler(InMemoryTableSource::new())
            .handle(RunAnalyticsQuery::default())
            .await
            .unwrap();

        assert_eq!(report.len(), 25);
        assert_eq!(report.placeholder_count(), 25);
    }

    #[tokio::test]
    async fn explicit_as_of_is_reported() {
        let venues = LogicalTable::from_rows(
            &["name", "capacity"],
            vec![vec![Value::from("Eden Gardens"), Value::from(68_000)]],
        )
        .unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let report = handler(InMemoryTableSource::new().with_table("venues", venues))
            .handle(RunAnalyticsQuery { as_of: Some(as_of) })
            .await
            .unwrap();

        assert_eq!(report.as_of, as_of);
        assert_eq!(report.get(4).unwrap().result.as_table().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn offline_store_is_an_error() {
        let source = InMemoryTableSource::new();
        source.set_offline(true).await;
        let result = handler(source).handle(RunAnalyticsQuery::default()).await;
        assert!(matches!(result, Err(ProbeError::StoreUnavailable(_))));
    }
}
