//! Tabular data model shared by the schema prober and the analyzers.
//!
//! - `Value` - a dynamically typed cell with lenient coercions
//! - `LogicalTable` - columnar rows loaded from the store
//! - `TableRegistry` - the tables available to one batch run

mod logical_table;
mod registry;
mod value;

pub use logical_table::{has_columns, Column, LogicalTable, TableError};
pub use registry::{LogicalName, Requirement, TableRegistry};
pub use value::Value;
