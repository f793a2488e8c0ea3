//! Habit — the persisted record for a trackable recurring activity.
//!
//! Title, category, and owner are opaque to this crate; only the completion
//! history and the cached streak carry domain meaning. `current_streak` is
//! always recomputable from `completion_history` and is recomputed on every
//! mutation of the history (see [`crate::streak`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day::Day;

/// A persisted habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
  pub habit_id:           Uuid,
  pub title:              String,
  pub category:           String,
  pub owner_email:        String,
  /// Server-assigned at creation; never changes afterwards.
  pub created_at:         DateTime<Utc>,
  /// Ascending calendar-day markers; no two markers name the same day.
  pub completion_history: Vec<Day>,
  /// Cached value of the streak computation, never the source of truth.
  pub current_streak:     u32,
}

/// Input to [`crate::store::HabitStore::create_habit`].
/// `habit_id` and `created_at` are always set by the store.
///
/// Fields default to empty strings so that "absent" and "empty" are the
/// same condition for the API's required-field check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewHabit {
  pub title:       String,
  pub category:    String,
  pub owner_email: String,
}

/// A partial update of the uninterpreted habit fields. `None` leaves the
/// stored value untouched. The completion history is not reachable from
/// here; it only changes through the completion operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitUpdate {
  pub title:       Option<String>,
  pub category:    Option<String>,
  pub owner_email: Option<String>,
}
