//! Question descriptors and the guard helpers analyzers start with.

use std::fmt;

use super::error::AnalysisError;
use super::result::{AnalysisResult, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, Requirement, TableRegistry};

/// Signature every analyzer implements.
pub type AnalyzeFn = fn(&TableRegistry) -> Result<ResultTable, AnalysisError>;

/// One of the analytical questions in the batch.
#[derive(Clone, Copy)]
pub struct AnalysisQuestion {
    pub ordinal: u8,
    pub label: &'static str,
    pub analyze: AnalyzeFn,
}

impl AnalysisQuestion {
    pub const fn new(ordinal: u8, label: &'static str, analyze: AnalyzeFn) -> Self {
        Self {
            ordinal,
            label,
            analyze,
        }
    }

    /// Runs the analyzer and folds its error into a placeholder.
    pub fn evaluate(&self, registry: &TableRegistry) -> AnalysisResult {
        (self.analyze)(registry).into()
    }
}

impl fmt::Debug for AnalysisQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisQuestion")
            .field("ordinal", &self.ordinal)
            .field("label", &self.label)
            .finish()
    }
}

/// Returns the table when it has rows and all `columns`.
pub fn require<'a>(
    registry: &'a TableRegistry,
    table: LogicalName,
    columns: &[&str],
) -> Result<&'a LogicalTable, AnalysisError> {
    match registry.get(table) {
        Some(t) if t.has_columns(columns) => Ok(t),
        _ => Err(AnalysisError::insufficient(Requirement::new(table, columns))),
    }
}

/// Returns the first satisfied column set and its index.
pub fn require_any<'a>(
    registry: &'a TableRegistry,
    table: LogicalName,
    alternatives: &[&[&str]],
) -> Result<(&'a LogicalTable, usize), AnalysisError> {
    for (index, columns) in alternatives.iter().enumerate() {
        if let Ok(t) = require(registry, table, columns) {
            return Ok((t, index));
        }
    }
    Err(AnalysisError::Insufficient(
        alternatives
            .iter()
            .map(|columns| Requirement::new(table, columns))
            .collect(),
    ))
}
