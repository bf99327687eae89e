//! ExportQuestionCsvHandler - Runs one catalog question and renders it as CSV.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::analytics::{BatchRunner, ExportError};

use super::schema_prober::{ProbeError, SchemaProber};

/// Query to export one question's result.
#[derive(Debug, Clone)]
pub struct ExportQuestionCsvQuery {
    pub ordinal: u8,
    pub as_of: Option<NaiveDate>,
}

/// A rendered CSV download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub body: String,
}

/// Errors from CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ExportCsvError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(u8),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("CSV export failed: {0}")]
    Export(#[from] ExportError),
}

/// Handler for single-question CSV export.
pub struct ExportQuestionCsvHandler {
    prober: SchemaProber,
    runner: Arc<BatchRunner>,
}

impl ExportQuestionCsvHandler {
    pub fn new(prober: SchemaProber, runner: Arc<BatchRunner>) -> Self {
        Self { prober, runner }
    }

    pub async fn handle(&self, query: ExportQuestionCsvQuery) -> Result<CsvExport, ExportCsvError> {
        let question = self
            .runner
            .questions()
            .iter()
            .find(|q| q.ordinal == query.ordinal)
            .copied()
            .ok_or(ExportCsvError::UnknownQuestion(query.ordinal))?;

        let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let registry = self.prober.probe(as_of).await?;

        let report = BatchRunner::with_questions(vec![question]).run_all(&registry);
        let entry = report
            .get(query.ordinal)
            .ok_or(ExportCsvError::UnknownQuestion(query.ordinal))?;

        Ok(CsvExport {
            file_name: entry.file_name(),
            body: entry.result.to_csv()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTableSource;
    use crate::domain::table::{LogicalTable, Value};

    fn handler(source: InMemoryTableSource) -> ExportQuestionCsvHandler {
        ExportQuestionCsvHandler::new(
            SchemaProber::new(Arc::new(source)),
            Arc::new(BatchRunner::new()),
        )
    }

    #[tokio::test]
    async fn exports_a_result_table() {
        let venues = LogicalTable::from_rows(
            &["name", "city", "capacity"],
            vec![
                vec![Value::from("MCG"), Value::from("Melbourne"), Value::from(100_024)],
                vec![Value::from("Small"), Value::from("Town"), Value::from(50_000)],
            ],
        )
        .unwrap();

        let export = handler(InMemoryTableSource::new().with_table("venues", venues))
            .handle(ExportQuestionCsvQuery { ordinal: 4, as_of: None })
            .await
            .unwrap();

        assert_eq!(export.file_name, "Q04_Venues_with_capacity_50000.csv");
        assert!(export.body.contains("MCG"));
        assert!(!export.body.contains("Small"));
    }

    #[tokio::test]
    async fn placeholder_exports_info_column() {
        let export = handler(InMemoryTableSource::new())
            .handle(ExportQuestionCsvQuery { ordinal: 1, as_of: None })
            .await
            .unwrap();
        assert!(export.body.starts_with("info\n"));
    }

    #[tokio::test]
    async fn unknown_ordinal_is_rejected() {
        let result = handler(InMemoryTableSource::new())
            .handle(ExportQuestionCsvQuery { ordinal: 26, as_of: None })
            .await;
        assert!(matches!(result, Err(ExportCsvError::UnknownQuestion(26))));
    }
}
