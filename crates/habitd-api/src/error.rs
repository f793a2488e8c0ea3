//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The store boundary speaks [`habitd_core::Error`]; this is the single
//! place where that taxonomy is translated into transport status codes.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use habitd_core::day::Day;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("already completed today ({0})")]
  AlreadyCompleted(Day),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<habitd_core::Error> for ApiError {
  fn from(e: habitd_core::Error) -> Self {
    match e {
      habitd_core::Error::HabitNotFound(id) => {
        ApiError::NotFound(format!("habit {id} not found"))
      }
      habitd_core::Error::AlreadyCompleted(day) => {
        ApiError::AlreadyCompleted(day)
      }
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::AlreadyCompleted(_) => {
        (StatusCode::BAD_REQUEST, "already completed today".to_string())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
