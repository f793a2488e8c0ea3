//! SQLite backend for the habitd habit store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The single connection also gives the
//! completion operation its atomicity: check-and-append runs as one
//! transaction, so two requests racing to complete the same habit on the
//! same day cannot both win.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
