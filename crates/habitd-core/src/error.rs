//! Error types for `habitd-core`.
//!
//! This is the canonical error taxonomy of the store boundary. Backends map
//! their internal failures into [`Error::Store`]; domain rejections use the
//! dedicated variants. Translation to HTTP status codes happens only in the
//! API crate.

use thiserror::Error;
use uuid::Uuid;

use crate::day::Day;

#[derive(Debug, Error)]
pub enum Error {
  #[error("habit not found: {0}")]
  HabitNotFound(Uuid),

  #[error("habit already completed on {0}")]
  AlreadyCompleted(Day),

  #[error("invalid calendar day: {0:?}")]
  InvalidDay(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
