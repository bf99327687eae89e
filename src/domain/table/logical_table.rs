//! In-memory columnar table loaded from the store.

use thiserror::Error;

use super::value::Value;

static NULL: Value = Value::Null;

/// Errors raised while assembling a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}' has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// One named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// A dataset with ordered columns sharing one row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogicalTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl LogicalTable {
    /// Creates an empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from row-major data.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if columns.iter().any(|c| c.name == name) {
                return Err(TableError::DuplicateColumn(name.to_string()));
            }
            columns.push(Column {
                name: name.to_string(),
                values: Vec::with_capacity(rows.len()),
            });
        }

        let row_count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidthMismatch {
                    row: index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Appends a column. The first column fixes the row count.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Result<Self, TableError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.row_count = values.len();
        } else if values.len() != self.row_count {
            return Err(TableError::ColumnLengthMismatch {
                column: name,
                expected: self.row_count,
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// True when the table has rows and every listed column.
    pub fn has_columns(&self, required: &[&str]) -> bool {
        !self.is_empty() && required.iter().all(|name| self.has_column(name))
    }

    /// Cell lookup. Missing columns and out-of-range rows read as `Null`,
    /// which is how optional columns are substituted.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.column(column)
            .and_then(|c| c.values.get(row))
            .unwrap_or(&NULL)
    }

    /// Drops rows beyond `max_rows`.
    pub fn truncate(&mut self, max_rows: usize) {
        if max_rows >= self.row_count {
            return;
        }
        for column in &mut self.columns {
            column.values.truncate(max_rows);
        }
        self.row_count = max_rows;
    }
}

/// Column availability check over a possibly absent table.
///
/// False for an absent table, a table with zero rows, or a table missing any
/// of the required columns.
pub fn has_columns(table: Option<&LogicalTable>, required: &[&str]) -> bool {
    table.is_some_and(|t| t.has_columns(required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> LogicalTable {
        LogicalTable::from_rows(
            &["player_name", "runs"],
            vec![
                vec![Value::text("A"), Value::Int(10)],
                vec![Value::text("B"), Value::Int(99)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_rows_builds_columns() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["player_name", "runs"]);
        assert_eq!(table.value(1, "runs"), &Value::Int(99));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = LogicalTable::from_rows(&["a", "b"], vec![vec![Value::Int(1)]]).unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidthMismatch {
                row: 0,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_duplicate_columns() {
        let err = LogicalTable::from_rows(&["a", "a"], vec![]).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn with_column_checks_length() {
        let err = LogicalTable::new()
            .with_column("a", vec![Value::Int(1), Value::Int(2)])
            .and_then(|t| t.with_column("b", vec![Value::Int(1)]))
            .unwrap_err();
        assert!(matches!(err, TableError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn missing_cells_read_as_null() {
        let table = sample();
        assert_eq!(table.value(0, "wickets"), &Value::Null);
        assert_eq!(table.value(7, "runs"), &Value::Null);
    }

    #[test]
    fn has_columns_requires_rows_and_every_column() {
        let table = sample();
        assert!(has_columns(Some(&table), &["runs"]));
        assert!(has_columns(Some(&table), &[]));
        assert!(!has_columns(Some(&table), &["runs", "wickets"]));
        assert!(!has_columns(None, &["runs"]));

        let empty = LogicalTable::from_rows(&["runs"], vec![]).unwrap();
        assert!(!has_columns(Some(&empty), &["runs"]));
    }

    #[test]
    fn truncate_caps_rows() {
        let mut table = sample();
        table.truncate(1);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(1, "runs"), &Value::Null);
    }

    proptest! {
        #[test]
        fn has_columns_matches_schema_membership(
            present in proptest::collection::btree_set("[a-z]{1,6}", 0..6),
            required in proptest::collection::vec("[a-z]{1,6}", 0..6),
            rows in 0usize..3,
        ) {
            let names: Vec<&str> = present.iter().map(String::as_str).collect();
            let data = (0..rows).map(|_| vec![Value::Null; names.len()]).collect();
            let table = LogicalTable::from_rows(&names, data).unwrap();
            let required: Vec<&str> = required.iter().map(String::as_str).collect();

            let expected = rows > 0 && required.iter().all(|r| present.contains(*r));
            prop_assert_eq!(has_columns(Some(&table), &required), expected);
            prop_assert!(!has_columns(None, &required));
        }
    }
}
