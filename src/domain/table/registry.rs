//! Logical table names and the per-run registry of loaded tables.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::logical_table::LogicalTable;

/// Tables the analytics layer knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalName {
    Players,
    Matches,
    Venues,
    Series,
    Performances,
    Partnerships,
    Teams,
}

impl LogicalName {
    pub const ALL: [LogicalName; 7] = [
        LogicalName::Players,
        LogicalName::Matches,
        LogicalName::Venues,
        LogicalName::Series,
        LogicalName::Performances,
        LogicalName::Partnerships,
        LogicalName::Teams,
    ];

    pub fn canonical(&self) -> &'static str {
        match self {
            LogicalName::Players => "players",
            LogicalName::Matches => "matches",
            LogicalName::Venues => "venues",
            LogicalName::Series => "series",
            LogicalName::Performances => "performances",
            LogicalName::Partnerships => "partnerships",
            LogicalName::Teams => "teams",
        }
    }

    /// Alternate spellings tried after the canonical one (at most two).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            LogicalName::Players => &["player"],
            LogicalName::Matches => &["match"],
            LogicalName::Venues => &["venue"],
            LogicalName::Series => &[],
            LogicalName::Performances => &["performance"],
            LogicalName::Partnerships => &["partnership"],
            LogicalName::Teams => &["team"],
        }
    }

    /// Canonical spelling followed by aliases, in probe order.
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.canonical()).chain(self.aliases().iter().copied())
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// A column set an analyzer needs on one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub table: LogicalName,
    pub columns: Vec<String>,
}

impl Requirement {
    pub fn new(table: LogicalName, columns: &[&str]) -> Self {
        Self {
            table,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "columns {} on table {}", self.columns.join(", "), self.table)
    }
}

/// Tables loaded for one batch run.
///
/// Each logical name maps to at most one table. `as_of` is the reference
/// date for time-windowed questions, so two runs over the same snapshot
/// agree.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegistry {
    tables: BTreeMap<LogicalName, LogicalTable>,
    as_of: NaiveDate,
}

impl TableRegistry {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            tables: BTreeMap::new(),
            as_of,
        }
    }

    pub fn with_table(mut self, name: LogicalName, table: LogicalTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Stores a table, replacing any previous one under the same name.
    pub fn insert(&mut self, name: LogicalName, table: LogicalTable) {
        self.tables.insert(name, table);
    }

    pub fn get(&self, name: LogicalName) -> Option<&LogicalTable> {
        self.tables.get(&name)
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn has_columns(&self, name: LogicalName, required: &[&str]) -> bool {
        super::has_columns(self.get(name), required)
    }

    /// Names that currently hold a table.
    pub fn present(&self) -> Vec<LogicalName> {
        self.tables.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Value;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn spellings_start_with_canonical() {
        let spellings: Vec<_> = LogicalName::Players.spellings().collect();
        assert_eq!(spellings, vec!["players", "player"]);
        assert_eq!(LogicalName::Series.spellings().count(), 1);
    }

    #[test]
    fn no_name_has_more_than_two_aliases() {
        for name in LogicalName::ALL {
            assert!(name.aliases().len() <= 2, "{} has too many aliases", name);
        }
    }

    #[test]
    fn requirement_display_names_columns_and_table() {
        let req = Requirement::new(LogicalName::Venues, &["capacity", "name"]);
        assert_eq!(req.to_string(), "columns capacity, name on table venues");
    }

    #[test]
    fn registry_reports_columns_of_present_tables() {
        let table = LogicalTable::from_rows(&["capacity"], vec![vec![Value::Int(60000)]]).unwrap();
        let registry = TableRegistry::new(as_of()).with_table(LogicalName::Venues, table);

        assert!(registry.has_columns(LogicalName::Venues, &["capacity"]));
        assert!(!registry.has_columns(LogicalName::Matches, &[]));
        assert_eq!(registry.present(), vec![LogicalName::Venues]);
    }

    #[test]
    fn insert_replaces_existing_table() {
        let mut registry = TableRegistry::new(as_of());
        registry.insert(LogicalName::Teams, LogicalTable::new());
        let replacement = LogicalTable::from_rows(&["wins"], vec![vec![Value::Int(1)]]).unwrap();
        registry.insert(LogicalName::Teams, replacement.clone());
        assert_eq!(registry.get(LogicalName::Teams), Some(&replacement));
    }
}
