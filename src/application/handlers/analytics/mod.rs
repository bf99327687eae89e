//! Analytics handlers.
//!
//! Probe the store once per request, then run the question catalog over the
//! resulting registry.

mod export_csv;
mod run_analytics;
mod schema_prober;

pub use export_csv::{CsvExport, ExportCsvError, ExportQuestionCsvHandler, ExportQuestionCsvQuery};
pub use run_analytics::{RunAnalyticsHandler, RunAnalyticsQuery};
pub use schema_prober::{ProbeError, SchemaProber, DEFAULT_PROBE_CONCURRENCY, DEFAULT_ROW_CAP};
