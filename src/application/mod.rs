//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Query handlers read (analytics, feed, player lookups); command handlers
//! write player records.

pub mod handlers;

pub use handlers::{
    ExportQuestionCsvHandler, GetMatchesHandler, GetRankingsHandler, ProbeError,
    RunAnalyticsHandler, SchemaProber,
};
