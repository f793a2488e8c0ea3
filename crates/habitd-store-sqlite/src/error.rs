//! Error type for `habitd-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] habitd_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

/// Fold into the canonical taxonomy at the trait boundary: domain rejections
/// pass through, everything else becomes an opaque store failure.
impl From<Error> for habitd_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      other => habitd_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
