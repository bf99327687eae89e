//! Cricket Analytics - statistics service over a loosely-specified cricket schema.
//!
//! The core runs a fixed catalog of 25 analytical questions against whatever
//! tables the store happens to hold, degrading each question to a placeholder
//! when its inputs are missing. Around it sit a live match and rankings feed
//! client and CRUD over player records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
