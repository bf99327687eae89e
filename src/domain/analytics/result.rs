//! Analyzer outputs and their CSV export.

use serde::Serialize;
use thiserror::Error;

use super::error::AnalysisError;
use crate::domain::table::Value;

/// Errors from CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer flush failed: {0}")]
    Flush(String),

    #[error("csv output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A fully computed result: named output columns and complete rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Table whose column set is only known at run time.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Adds a row. A row of the wrong width is a computation error.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), AnalysisError> {
        if row.len() != self.columns.len() {
            return Err(AnalysisError::computation(format!(
                "row has {} values for {} output columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one output column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Header row plus one record per row; nulls become empty fields.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        finish(writer)
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    InsufficientData,
    Error,
}

/// Stands in for a table the analyzer could not justify.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub message: String,
}

impl Placeholder {
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self {
            kind: PlaceholderKind::InsufficientData,
            message: message.into(),
        }
    }

    /// Error placeholder; the message is prefixed with `error: `.
    pub fn error(detail: impl AsRef<str>) -> Self {
        Self {
            kind: PlaceholderKind::Error,
            message: format!("error: {}", detail.as_ref()),
        }
    }
}

impl From<AnalysisError> for Placeholder {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Insufficient(_) => Placeholder::insufficient_data(err.to_string()),
            AnalysisError::Computation(message) => Placeholder::error(message),
        }
    }
}

/// Outcome of one analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    Table(ResultTable),
    Placeholder(Placeholder),
}

impl AnalysisResult {
    pub fn as_table(&self) -> Option<&ResultTable> {
        match self {
            AnalysisResult::Table(table) => Some(table),
            AnalysisResult::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            AnalysisResult::Placeholder(p) => Some(p),
            AnalysisResult::Table(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.as_placeholder().is_some()
    }

    /// CSV for download. Placeholders export as a single `info` column.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        match self {
            AnalysisResult::Table(table) => table.to_csv(),
            AnalysisResult::Placeholder(placeholder) => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record(["info"])?;
                writer.write_record([placeholder.message.as_str()])?;
                finish(writer)
            }
        }
    }
}

impl From<Result<ResultTable, AnalysisError>> for AnalysisResult {
    fn from(outcome: Result<ResultTable, AnalysisError>) -> Self {
        match outcome {
            Ok(table) => AnalysisResult::Table(table),
            Err(err) => AnalysisResult::Placeholder(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{LogicalName, Requirement};

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut table = ResultTable::new(&["team", "wins"]);
        assert!(table.push_row(vec![Value::text("India")]).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn csv_has_header_and_empty_nulls() {
        let mut table = ResultTable::new(&["player_name", "bat_avg"]);
        table.push_row(vec![Value::text("Kohli, V"), Value::Null]).unwrap();
        table.push_row(vec![Value::text("Rohit"), Value::Float(48.5)]).unwrap();

        let csv = table.to_csv().unwrap();
        assert_eq!(csv, "player_name,bat_avg\n\"Kohli, V\",\nRohit,48.5\n");
    }

    #[test]
    fn placeholder_exports_info_column() {
        let result = AnalysisResult::from(Err::<ResultTable, _>(AnalysisError::insufficient(
            Requirement::new(LogicalName::Venues, &["capacity"]),
        )));
        assert_eq!(
            result.to_csv().unwrap(),
            "info\ninsufficient data: need columns capacity on table venues\n"
        );
    }

    #[test]
    fn computation_errors_become_error_placeholders() {
        let placeholder = Placeholder::from(AnalysisError::computation("bad margin"));
        assert_eq!(placeholder.kind, PlaceholderKind::Error);
        assert_eq!(placeholder.message, "error: bad margin");
    }

    #[test]
    fn serializes_with_type_tag() {
        let mut table = ResultTable::new(&["role", "count"]);
        table.push_row(vec![Value::text("Batsman"), Value::Int(3)]).unwrap();
        let json = serde_json::to_value(AnalysisResult::Table(table)).unwrap();
        assert_eq!(json["type"], "table");
        assert_eq!(json["rows"][0][1], 3);

        let json = serde_json::to_value(AnalysisResult::Placeholder(Placeholder::error("x"))).unwrap();
        assert_eq!(json["type"], "placeholder");
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "error: x");
    }
}
