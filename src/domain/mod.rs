//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared validation errors
//! - `table` - Cell values, loaded tables, and the per-run table registry
//! - `analytics` - The question catalog, analyzers, and batch runner
//! - `feed` - Match listings and rankings from the upstream feed
//! - `player` - Player statistics records

pub mod analytics;
pub mod feed;
pub mod foundation;
pub mod player;
pub mod table;
