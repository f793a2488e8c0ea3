//! Handlers for the habit endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/habits` | All habits, newest first |
//! | `POST`   | `/habits` | Body: [`NewHabit`]; 400 on missing fields |
//! | `GET`    | `/habits/featured` | Newest six habits |
//! | `GET`    | `/my-habits` | `?email=` required |
//! | `GET`    | `/habits/:id` | 404 if not found |
//! | `PUT`    | `/habits/:id` | Body: [`HabitUpdate`] |
//! | `DELETE` | `/habits/:id` | 204 on success |
//! | `PATCH`  | `/habits/complete/:id` | Mark complete for today |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use habitd_core::{
  day::Day,
  habit::{Habit, HabitUpdate, NewHabit},
  store::{HabitQuery, HabitStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// How many habits `/habits/featured` returns.
const FEATURED_LIMIT: usize = 6;

/// `GET /` — liveness probe.
pub async fn health() -> &'static str { "habitd API is running" }

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /habits`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Habit>>, ApiError>
where
  S: HabitStore,
{
  let habits = store.list_habits(HabitQuery::default()).await?;
  Ok(Json(habits))
}

/// `GET /habits/featured` — the newest [`FEATURED_LIMIT`] habits.
pub async fn featured<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Habit>>, ApiError>
where
  S: HabitStore,
{
  let habits = store
    .list_habits(HabitQuery { limit: Some(FEATURED_LIMIT), ..Default::default() })
    .await?;
  Ok(Json(habits))
}

#[derive(Debug, Deserialize)]
pub struct OwnerParams {
  pub email: Option<String>,
}

/// `GET /my-habits?email=<owner>`
pub async fn by_owner<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<OwnerParams>,
) -> Result<Json<Vec<Habit>>, ApiError>
where
  S: HabitStore,
{
  let email = params
    .email
    .filter(|e| !e.is_empty())
    .ok_or_else(|| ApiError::BadRequest("email is required".to_string()))?;

  let habits = store
    .list_habits(HabitQuery { owner: Some(email), ..Default::default() })
    .await?;
  Ok(Json(habits))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /habits` — body: `{"title":..,"category":..,"owner_email":..}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewHabit>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  if body.title.is_empty() || body.category.is_empty() || body.owner_email.is_empty()
  {
    return Err(ApiError::BadRequest("missing required fields".to_string()));
  }

  let habit = store.create_habit(body).await?;
  Ok((StatusCode::CREATED, Json(habit)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /habits/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let habit = store
    .get_habit(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("habit {id} not found")))?;
  Ok(Json(habit))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /habits/:id` — partial update of title/category/owner.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(changes): Json<HabitUpdate>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let habit = store.update_habit(id, changes).await?;
  Ok(Json(habit))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /habits/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: HabitStore,
{
  store.delete_habit(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Complete ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
  pub message:        &'static str,
  pub current_streak: u32,
}

/// `PATCH /habits/complete/:id` — record a completion for today.
///
/// "Today" is the server's local date at request time; the store performs
/// the check-and-append atomically, so repeating the request on the same
/// day yields 400 and leaves the history untouched.
pub async fn complete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CompleteResponse>, ApiError>
where
  S: HabitStore,
{
  let habit = store.complete_today(id, Day::today()).await?;
  Ok(Json(CompleteResponse {
    message:        "habit marked complete",
    current_streak: habit.current_streak,
  }))
}
