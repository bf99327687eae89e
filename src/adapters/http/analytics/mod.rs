//! Analytics HTTP adapter module.
//!
//! - `GET /api/analytics` - Full batch report as JSON
//! - `GET /api/analytics/:ordinal/csv` - One question's result as CSV

pub mod handlers;
pub mod routes;

pub use handlers::AnalyticsAppState;
pub use routes::analytics_routes;
