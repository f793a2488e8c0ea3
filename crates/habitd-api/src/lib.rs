//! JSON REST API for habitd.
//!
//! Exposes an axum [`Router`] backed by any
//! [`habitd_core::store::HabitStore`]. TLS and transport concerns are the
//! caller's responsibility; the `server` binary in this crate wires the
//! router to the SQLite store with logging and CORS.

pub mod error;
pub mod habits;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, patch},
};
use habitd_core::store::HabitStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HABITD_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("habits.db") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: HabitStore + 'static,
{
  Router::new()
    .route("/", get(habits::health))
    .route("/habits", get(habits::list::<S>).post(habits::create::<S>))
    .route("/habits/featured", get(habits::featured::<S>))
    .route("/my-habits", get(habits::by_owner::<S>))
    .route(
      "/habits/{id}",
      get(habits::get_one::<S>)
        .put(habits::update_one::<S>)
        .delete(habits::delete_one::<S>),
    )
    .route("/habits/complete/{id}", patch(habits::complete_one::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use habitd_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn oneshot(
    store: Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    api_router(store).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn new_habit(title: &str, owner: &str) -> Value {
    json!({ "title": title, "category": "health", "owner_email": owner })
  }

  // ── Liveness ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_returns_liveness_text() {
    let resp = oneshot(store().await, "GET", "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_fresh_habit() {
    let resp = oneshot(
      store().await,
      "POST",
      "/habits",
      Some(new_habit("Run", "alice@example.com")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let habit = json_body(resp).await;
    assert_eq!(habit["title"], "Run");
    assert_eq!(habit["current_streak"], 0);
    assert_eq!(habit["completion_history"], json!([]));
  }

  #[tokio::test]
  async fn create_with_missing_fields_returns_400() {
    let resp =
      oneshot(store().await, "POST", "/habits", Some(json!({ "title": "Run" })))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_all_habits() {
    let s = store().await;
    oneshot(s.clone(), "POST", "/habits", Some(new_habit("Run", "a@x.com")))
      .await;
    oneshot(s.clone(), "POST", "/habits", Some(new_habit("Read", "b@x.com")))
      .await;

    let resp = oneshot(s, "GET", "/habits", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let habits = json_body(resp).await;
    assert_eq!(habits.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn featured_caps_at_six() {
    let s = store().await;
    for i in 0..8 {
      oneshot(
        s.clone(),
        "POST",
        "/habits",
        Some(new_habit(&format!("Habit {i}"), "a@x.com")),
      )
      .await;
    }

    let resp = oneshot(s, "GET", "/habits/featured", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let habits = json_body(resp).await;
    assert_eq!(habits.as_array().unwrap().len(), 6);
  }

  // ── Owner filter ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn my_habits_without_email_returns_400() {
    let resp = oneshot(store().await, "GET", "/my-habits", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn my_habits_filters_by_owner() {
    let s = store().await;
    oneshot(s.clone(), "POST", "/habits", Some(new_habit("Run", "a@x.com")))
      .await;
    oneshot(s.clone(), "POST", "/habits", Some(new_habit("Read", "b@x.com")))
      .await;

    let resp = oneshot(s, "GET", "/my-habits?email=a@x.com", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let habits = json_body(resp).await;
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["owner_email"], "a@x.com");
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_id_returns_404() {
    let uri = format!("/habits/{}", uuid::Uuid::new_v4());
    let resp = oneshot(store().await, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_updates_title_and_keeps_other_fields() {
    let s = store().await;
    let created = json_body(
      oneshot(s.clone(), "POST", "/habits", Some(new_habit("Run", "a@x.com")))
        .await,
    )
    .await;
    let id = created["habit_id"].as_str().unwrap().to_string();

    let resp = oneshot(
      s.clone(),
      "PUT",
      &format!("/habits/{id}"),
      Some(json!({ "title": "Sprint" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = json_body(resp).await;
    assert_eq!(updated["title"], "Sprint");
    assert_eq!(updated["category"], "health");
    assert_eq!(updated["owner_email"], "a@x.com");
  }

  #[tokio::test]
  async fn put_unknown_id_returns_404() {
    let uri = format!("/habits/{}", uuid::Uuid::new_v4());
    let resp = oneshot(
      store().await,
      "PUT",
      &uri,
      Some(json!({ "title": "Sprint" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_get_returns_404() {
    let s = store().await;
    let created = json_body(
      oneshot(s.clone(), "POST", "/habits", Some(new_habit("Run", "a@x.com")))
        .await,
    )
    .await;
    let id = created["habit_id"].as_str().unwrap().to_string();

    let del = oneshot(s.clone(), "DELETE", &format!("/habits/{id}"), None).await;
    assert_eq!(del.status(), StatusCode::NO_CONTENT);

    let get = oneshot(s, "GET", &format!("/habits/{id}"), None).await;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_unknown_id_returns_404() {
    let uri = format!("/habits/{}", uuid::Uuid::new_v4());
    let resp = oneshot(store().await, "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Complete ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn complete_starts_a_streak_and_rejects_a_repeat() {
    let s = store().await;
    let created = json_body(
      oneshot(s.clone(), "POST", "/habits", Some(new_habit("Run", "a@x.com")))
        .await,
    )
    .await;
    let id = created["habit_id"].as_str().unwrap().to_string();

    let first =
      oneshot(s.clone(), "PATCH", &format!("/habits/complete/{id}"), None)
        .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body = json_body(first).await;
    assert_eq!(body["current_streak"], 1);

    let second =
      oneshot(s.clone(), "PATCH", &format!("/habits/complete/{id}"), None)
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    // The rejected repeat left the stored history untouched.
    let habit =
      json_body(oneshot(s, "GET", &format!("/habits/{id}"), None).await).await;
    assert_eq!(habit["completion_history"].as_array().unwrap().len(), 1);
    assert_eq!(habit["current_streak"], 1);
  }

  #[tokio::test]
  async fn complete_unknown_id_returns_404() {
    let uri = format!("/habits/complete/{}", uuid::Uuid::new_v4());
    let resp = oneshot(store().await, "PATCH", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
