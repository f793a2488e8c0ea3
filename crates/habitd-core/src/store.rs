//! The `HabitStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `habitd-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.
//! A store is an explicitly constructed value handed to its callers — there
//! is no ambient global connection anywhere in the workspace.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  day::Day,
  habit::{Habit, HabitUpdate, NewHabit},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`HabitStore::list_habits`].
#[derive(Debug, Clone, Default)]
pub struct HabitQuery {
  /// Restrict to habits owned by this email.
  pub owner: Option<String>,
  /// Cap the number of returned habits (after sorting newest-first).
  pub limit: Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a habit store backend.
///
/// All methods return the canonical [`crate::Error`] taxonomy; backends fold
/// their internal failures into [`crate::Error::Store`]. Domain rejections
/// (`HabitNotFound`, `AlreadyCompleted`) come through as their own variants
/// so the transport layer can map them to precise status codes.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  /// Create and persist a new habit with an empty completion history and a
  /// streak of zero. The id and creation timestamp are set by the store.
  fn create_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit>> + Send + '_;

  /// Retrieve a habit by id. Returns `None` if not found.
  fn get_habit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Habit>>> + Send + '_;

  /// List habits sorted newest-first by creation time, filtered and capped
  /// per `query`.
  fn list_habits(
    &self,
    query: HabitQuery,
  ) -> impl Future<Output = Result<Vec<Habit>>> + Send + '_;

  /// Apply a partial update to the uninterpreted fields of a habit and
  /// return the stored result. Fails with
  /// [`crate::Error::HabitNotFound`] if the id is unknown.
  fn update_habit(
    &self,
    id: Uuid,
    changes: HabitUpdate,
  ) -> impl Future<Output = Result<Habit>> + Send + '_;

  /// Delete a habit. Fails with [`crate::Error::HabitNotFound`] if the id
  /// is unknown.
  fn delete_habit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Atomically record a completion for `today`: fetch the history, run the
  /// streak engine, and persist the result as one conditional operation.
  ///
  /// Implementations must guarantee that two concurrent calls for the same
  /// habit and day cannot both succeed — the check that `today` is absent
  /// and the append must happen under the same transaction or lock. Fails
  /// with [`crate::Error::AlreadyCompleted`] when `today` is already
  /// recorded, leaving the stored history unchanged.
  fn complete_today(
    &self,
    id: Uuid,
    today: Day,
  ) -> impl Future<Output = Result<Habit>> + Send + '_;
}
