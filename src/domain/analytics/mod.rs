//! Analytics Module - adaptive batch analytics over a loosely specified schema.
//!
//! A batch run evaluates a fixed catalog of questions against the tables the
//! schema prober managed to load. Each question guards on the columns it
//! needs and degrades to a placeholder when they are missing, so one absent
//! table never costs more than the questions that depend on it.
//!
//! # Components
//!
//! - `AnalysisQuestion` - ordinal, label, and analyzer function
//! - `questions::catalog` - the 25 standard questions
//! - `BatchRunner` - sequential and concurrent evaluation with panic isolation
//! - `BatchReport` - ordered results with CSV export per entry

pub mod aggregate;
mod error;
mod question;
pub mod questions;
mod report;
mod result;
mod runner;

pub use error::AnalysisError;
pub use question::{require, require_any, AnalysisQuestion, AnalyzeFn};
pub use questions::catalog;
pub use report::{BatchReport, ReportEntry};
pub use result::{AnalysisResult, ExportError, Placeholder, PlaceholderKind, ResultTable};
pub use runner::BatchRunner;
