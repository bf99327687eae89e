//! In-memory adapters for tests and database-free runs.

mod player_repository;
mod table_source;

pub use player_repository::InMemoryPlayerRepository;
pub use table_source::InMemoryTableSource;
