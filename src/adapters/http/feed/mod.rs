//! Feed HTTP adapter module.
//!
//! - `GET /api/matches/:category` - live, recent, or upcoming matches
//! - `GET /api/rankings/:category/:format` - top-10 batsmen or bowlers

pub mod handlers;
pub mod routes;

pub use handlers::FeedAppState;
pub use routes::feed_routes;
