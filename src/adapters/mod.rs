//! Adapters - Implementations of port interfaces.
//!
//! - `mysql` - sqlx-backed table source and player repository
//! - `memory` - In-memory table source and player repository
//! - `feed` - RapidAPI cricket feed client
//! - `http` - axum REST API

pub mod feed;
pub mod http;
pub mod memory;
pub mod mysql;

pub use feed::{RapidApiConfig, RapidApiFeed};
pub use memory::{InMemoryPlayerRepository, InMemoryTableSource};
pub use mysql::{MySqlPlayerRepository, MySqlTableSource};
