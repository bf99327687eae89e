//! Batch runner: evaluates every question and assembles the report.
//!
//! Each analyzer is isolated. An insufficient-data or computation error
//! becomes a placeholder in that analyzer's slot, and a panic is caught and
//! reported as an error placeholder, so a run always yields one entry per
//! question in ordinal order.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::question::AnalysisQuestion;
use super::questions::catalog;
use super::report::{BatchReport, ReportEntry};
use super::result::{AnalysisResult, Placeholder};
use crate::domain::table::TableRegistry;

pub struct BatchRunner {
    questions: Vec<AnalysisQuestion>,
}

impl BatchRunner {
    /// Runner over the standard 25-question catalog.
    pub fn new() -> Self {
        Self::with_questions(catalog())
    }

    /// Runner over a custom question list, ordered by ordinal.
    pub fn with_questions(mut questions: Vec<AnalysisQuestion>) -> Self {
        questions.sort_by_key(|q| q.ordinal);
        Self { questions }
    }

    pub fn questions(&self) -> &[AnalysisQuestion] {
        &self.questions
    }

    /// Evaluates all questions one after another on the calling thread.
    pub fn run_all(&self, registry: &TableRegistry) -> BatchReport {
        let started = Instant::now();
        info!(questions = self.questions.len(), as_of = %registry.as_of(), "Starting analytics batch");

        let entries = self
            .questions
            .iter()
            .map(|question| {
                let result = catch_unwind(AssertUnwindSafe(|| question.evaluate(registry)))
                    .unwrap_or_else(|payload| panicked(question, payload.as_ref()));
                entry(question, result)
            })
            .collect();

        finish(registry, entries, started)
    }

    /// Evaluates all questions on the blocking pool and collects them in
    /// ordinal order.
    pub async fn run_all_concurrent(&self, registry: Arc<TableRegistry>) -> BatchReport {
        let started = Instant::now();
        info!(questions = self.questions.len(), as_of = %registry.as_of(), "Starting concurrent analytics batch");

        let tasks = self.questions.iter().map(|question| {
            let question = *question;
            let registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || question.evaluate(&registry))
        });
        let outcomes = join_all(tasks).await;

        let entries = self
            .questions
            .iter()
            .zip(outcomes)
            .map(|(question, outcome)| {
                let result = match outcome {
                    Ok(result) => result,
                    Err(join_error) if join_error.is_panic() => {
                        panicked(question, join_error.into_panic().as_ref())
                    }
                    Err(join_error) => {
                        warn!(ordinal = question.ordinal, error = %join_error, "Analyzer task did not complete");
                        AnalysisResult::Placeholder(Placeholder::error(join_error.to_string()))
                    }
                };
                entry(question, result)
            })
            .collect();

        finish(&registry, entries, started)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(question: &AnalysisQuestion, result: AnalysisResult) -> ReportEntry {
    if let AnalysisResult::Placeholder(placeholder) = &result {
        debug!(ordinal = question.ordinal, message = %placeholder.message, "Question produced a placeholder");
    }
    ReportEntry {
        ordinal: question.ordinal,
        label: question.label.to_string(),
        result,
    }
}

fn panicked(question: &AnalysisQuestion, payload: &(dyn Any + Send)) -> AnalysisResult {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "analyzer panicked".to_string());
    warn!(ordinal = question.ordinal, label = question.label, %message, "Analyzer panicked");
    AnalysisResult::Placeholder(Placeholder::error(message))
}

fn finish(registry: &TableRegistry, entries: Vec<ReportEntry>, started: Instant) -> BatchReport {
    let report = BatchReport {
        as_of: registry.as_of(),
        entries,
    };
    info!(
        entries = report.len(),
        placeholders = report.placeholder_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analytics batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::{AnalysisError, ResultTable};
    use crate::domain::table::Value;
    use chrono::NaiveDate;

    fn registry() -> TableRegistry {
        TableRegistry::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn one_row(_: &TableRegistry) -> Result<ResultTable, AnalysisError> {
        let mut table = ResultTable::new(&["n"]);
        table.push_row(vec![Value::Int(1)])?;
        Ok(table)
    }

    fn explodes(_: &TableRegistry) -> Result<ResultTable, AnalysisError> {
        panic!("divide by zero in analyzer")
    }

    fn custom_runner() -> BatchRunner {
        BatchRunner::with_questions(vec![
            AnalysisQuestion::new(3, "third", one_row),
            AnalysisQuestion::new(1, "first", one_row),
            AnalysisQuestion::new(2, "second", explodes),
        ])
    }

    #[test]
    fn standard_runner_covers_twenty_five_questions_in_order() {
        let report = BatchRunner::new().run_all(&registry());
        let ordinals: Vec<u8> = report.entries.iter().map(|e| e.ordinal).collect();
        assert_eq!(ordinals, (1..=25).collect::<Vec<u8>>());
        assert_eq!(report.placeholder_count(), 25);
    }

    #[test]
    fn panicking_analyzer_becomes_error_placeholder() {
        let report = custom_runner().run_all(&registry());
        assert_eq!(report.len(), 3);
        assert!(report.entries[0].result.as_table().is_some());
        assert_eq!(
            report.entries[1].result.as_placeholder().map(|p| p.message.clone()),
            Some("error: divide by zero in analyzer".to_string())
        );
        assert!(report.entries[2].result.as_table().is_some());
    }

    #[tokio::test]
    async fn concurrent_run_matches_sequential_run() {
        let registry = registry();
        let runner = custom_runner();
        let sequential = runner.run_all(&registry);
        let concurrent = runner.run_all_concurrent(Arc::new(registry)).await;
        assert_eq!(sequential, concurrent);
    }
}
