//! Core types and the streak engine for the habitd habit tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod day;
pub mod error;
pub mod habit;
pub mod store;
pub mod streak;

pub use error::{Error, Result};
