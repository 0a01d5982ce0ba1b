//! valuebet — single-user value-betting dashboard.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod engine;
pub mod odds;
pub mod history;
pub mod dashboard;
