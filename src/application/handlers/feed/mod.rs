//! Cricket feed query handlers.

mod get_matches;
mod get_rankings;

pub use get_matches::{GetMatchesHandler, GetMatchesQuery};
pub use get_rankings::{GetRankingsHandler, GetRankingsQuery};
