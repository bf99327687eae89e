//! MySQL adapters - sqlx implementations of the store ports.
//!
//! - `MySqlTableSource` - Read-only table loading for the analytics batch
//! - `MySqlPlayerRepository` - Player CRUD

mod player_repository;
mod table_source;

pub use player_repository::MySqlPlayerRepository;
pub use table_source::MySqlTableSource;
