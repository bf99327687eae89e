//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analytics;
pub mod feed;
pub mod players;

pub use analytics::{
    CsvExport, ExportCsvError, ExportQuestionCsvHandler, ExportQuestionCsvQuery, ProbeError,
    RunAnalyticsHandler, RunAnalyticsQuery, SchemaProber,
};
pub use feed::{GetMatchesHandler, GetMatchesQuery, GetRankingsHandler, GetRankingsQuery};
pub use players::{
    CreatePlayerCommand, CreatePlayerHandler, DeletePlayerCommand, DeletePlayerHandler,
    GetPlayerHandler, GetPlayerQuery, ListPlayersHandler, UpdatePlayerCommand,
    UpdatePlayerHandler,
};
