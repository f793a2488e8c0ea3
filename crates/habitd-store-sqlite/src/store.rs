//! [`SqliteStore`] — the SQLite implementation of [`HabitStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use habitd_core::{
  day::Day,
  habit::{Habit, HabitUpdate, NewHabit},
  store::{HabitQuery, HabitStore},
  streak,
};

use crate::{
  Error, Result,
  encode::{RawHabit, encode_dt, encode_history, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The store
/// is a plain value: construct it once at startup and hand clones to
/// whatever needs one.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Habit`] into the `habits` table.
  async fn insert_habit(&self, habit: &Habit) -> Result<()> {
    let habit_id_str = encode_uuid(habit.habit_id);
    let title        = habit.title.clone();
    let category     = habit.category.clone();
    let owner_email  = habit.owner_email.clone();
    let created_str  = encode_dt(habit.created_at);
    let history_str  = encode_history(&habit.completion_history)?;
    let streak_val   = i64::from(habit.current_streak);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO habits (
             habit_id, title, category, owner_email, created_at,
             completion_history, current_streak
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            habit_id_str,
            title,
            category,
            owner_email,
            created_str,
            history_str,
            streak_val,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_raw(&self, id: Uuid) -> Result<Option<RawHabit>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT habit_id, title, category, owner_email, created_at,
                    completion_history, current_streak
             FROM habits WHERE habit_id = ?1",
            rusqlite::params![id_str],
            |row| RawHabit::from_row(row),
          )
          .optional()?)
      })
      .await?;

    Ok(raw)
  }
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  async fn create_habit(&self, input: NewHabit) -> habitd_core::Result<Habit> {
    let habit = Habit {
      habit_id:           Uuid::new_v4(),
      title:              input.title,
      category:           input.category,
      owner_email:        input.owner_email,
      created_at:         Utc::now(),
      completion_history: Vec::new(),
      current_streak:     0,
    };

    self.insert_habit(&habit).await?;
    Ok(habit)
  }

  async fn get_habit(&self, id: Uuid) -> habitd_core::Result<Option<Habit>> {
    let raw = self.fetch_raw(id).await?;
    Ok(raw.map(RawHabit::into_habit).transpose()?)
  }

  async fn list_habits(
    &self,
    query: HabitQuery,
  ) -> habitd_core::Result<Vec<Habit>> {
    let owner = query.owner;
    // SQLite treats a negative LIMIT as "no limit".
    let limit = query.limit.map(|l| l as i64).unwrap_or(-1);

    let raws: Vec<RawHabit> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(owner) = owner {
          let mut stmt = conn.prepare(
            "SELECT habit_id, title, category, owner_email, created_at,
                    completion_history, current_streak
             FROM habits WHERE owner_email = ?1
             ORDER BY created_at DESC LIMIT ?2",
          )?;
          stmt
            .query_map(rusqlite::params![owner, limit], |row| {
              RawHabit::from_row(row)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT habit_id, title, category, owner_email, created_at,
                    completion_history, current_streak
             FROM habits
             ORDER BY created_at DESC LIMIT ?1",
          )?;
          stmt
            .query_map(rusqlite::params![limit], |row| RawHabit::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await
      .map_err(Error::from)?;

    raws
      .into_iter()
      .map(|raw| raw.into_habit().map_err(Into::into))
      .collect()
  }

  async fn update_habit(
    &self,
    id: Uuid,
    changes: HabitUpdate,
  ) -> habitd_core::Result<Habit> {
    let id_str = encode_uuid(id);

    let outcome: std::result::Result<RawHabit, habitd_core::Error> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raw: Option<RawHabit> = tx
          .query_row(
            "SELECT habit_id, title, category, owner_email, created_at,
                    completion_history, current_streak
             FROM habits WHERE habit_id = ?1",
            rusqlite::params![id_str],
            |row| RawHabit::from_row(row),
          )
          .optional()?;

        let Some(mut raw) = raw else {
          return Ok(Err(habitd_core::Error::HabitNotFound(id)));
        };

        if let Some(title) = changes.title {
          raw.title = title;
        }
        if let Some(category) = changes.category {
          raw.category = category;
        }
        if let Some(owner_email) = changes.owner_email {
          raw.owner_email = owner_email;
        }

        tx.execute(
          "UPDATE habits SET title = ?1, category = ?2, owner_email = ?3
           WHERE habit_id = ?4",
          rusqlite::params![raw.title, raw.category, raw.owner_email, raw.habit_id],
        )?;
        tx.commit()?;

        Ok(Ok(raw))
      })
      .await
      .map_err(Error::from)?;

    outcome?.into_habit().map_err(Into::into)
  }

  async fn delete_habit(&self, id: Uuid) -> habitd_core::Result<()> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM habits WHERE habit_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await
      .map_err(Error::from)?;

    if affected == 0 {
      return Err(habitd_core::Error::HabitNotFound(id));
    }
    Ok(())
  }

  async fn complete_today(
    &self,
    id: Uuid,
    today: Day,
  ) -> habitd_core::Result<Habit> {
    let id_str = encode_uuid(id);

    // Fetch, run the engine, and write back under one transaction on the
    // store's single connection. A concurrent completion for the same habit
    // observes either nothing or the committed append — never the window in
    // between — so only one request per day can succeed.
    let outcome: std::result::Result<RawHabit, habitd_core::Error> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raw: Option<RawHabit> = tx
          .query_row(
            "SELECT habit_id, title, category, owner_email, created_at,
                    completion_history, current_streak
             FROM habits WHERE habit_id = ?1",
            rusqlite::params![id_str],
            |row| RawHabit::from_row(row),
          )
          .optional()?;

        let Some(mut raw) = raw else {
          return Ok(Err(habitd_core::Error::HabitNotFound(id)));
        };

        let history: Vec<Day> =
          match serde_json::from_str(&raw.completion_history) {
            Ok(history) => history,
            Err(e) => return Ok(Err(habitd_core::Error::Serialization(e))),
          };

        let completion = match streak::record_completion(&history, today) {
          Ok(completion) => completion,
          Err(e) => return Ok(Err(e)),
        };

        let history_str = match serde_json::to_string(&completion.history) {
          Ok(s) => s,
          Err(e) => return Ok(Err(habitd_core::Error::Serialization(e))),
        };
        let streak_val = i64::from(completion.streak);

        tx.execute(
          "UPDATE habits SET completion_history = ?1, current_streak = ?2
           WHERE habit_id = ?3",
          rusqlite::params![history_str, streak_val, raw.habit_id],
        )?;
        tx.commit()?;

        raw.completion_history = history_str;
        raw.current_streak = streak_val;
        Ok(Ok(raw))
      })
      .await
      .map_err(Error::from)?;

    outcome?.into_habit().map_err(Into::into)
  }
}
