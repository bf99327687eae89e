//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TableSource` - Read-only access to the relational store
//! - `CricketFeed` - Live matches and rankings from the sports API
//! - `PlayerRepository` - CRUD over player records

mod cricket_feed;
mod player_repository;
mod table_source;

pub use cricket_feed::{CricketFeed, FeedError};
pub use player_repository::{PlayerError, PlayerRepository};
pub use table_source::{StoreError, TableSource};
