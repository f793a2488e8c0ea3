//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The completion history is a
//! compact JSON array of `DD-MM-YYYY` day strings, which is exactly the wire
//! format of [`habitd_core::day::Day`]. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use habitd_core::{day::Day, habit::Habit};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Completion history
// ───────────────────────────────────────────────────────

pub fn encode_history(days: &[Day]) -> Result<String> {
  Ok(serde_json::to_string(days)?)
}

pub fn decode_history(s: &str) -> Result<Vec<Day>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `habits` row.
pub struct RawHabit {
  pub habit_id:           String,
  pub title:              String,
  pub category:           String,
  pub owner_email:        String,
  pub created_at:         String,
  pub completion_history: String,
  pub current_streak:     i64,
}

impl RawHabit {
  /// Read a row in the canonical column order (see the SELECT statements in
  /// `store.rs`).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      habit_id:           row.get(0)?,
      title:              row.get(1)?,
      category:           row.get(2)?,
      owner_email:        row.get(3)?,
      created_at:         row.get(4)?,
      completion_history: row.get(5)?,
      current_streak:     row.get(6)?,
    })
  }

  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      habit_id:           decode_uuid(&self.habit_id)?,
      title:              self.title,
      category:           self.category,
      owner_email:        self.owner_email,
      created_at:         decode_dt(&self.created_at)?,
      completion_history: decode_history(&self.completion_history)?,
      current_streak:     u32::try_from(self.current_streak)
        .map_err(|_| Error::DateParse(format!(
          "negative streak in row: {}",
          self.current_streak
        )))?,
    })
  }
}
