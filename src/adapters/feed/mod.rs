//! Cricket feed adapters.

mod rapidapi;

pub use rapidapi::{RapidApiConfig, RapidApiFeed, DEFAULT_API_HOST};
