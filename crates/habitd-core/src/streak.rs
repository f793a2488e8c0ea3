//! The completion/streak engine.
//!
//! Pure functions over a habit's completion history and a caller-supplied
//! evaluation day. No I/O, no clock access: the caller decides what "today"
//! is, and every step of the backward scan is anchored to that value.

use crate::{Error, Result, day::Day};

/// The output of a successful [`record_completion`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
  /// The new history: the old markers plus `today`, sorted ascending.
  pub history: Vec<Day>,
  /// Consecutive days ending at and including `today`.
  pub streak:  u32,
}

/// Record a completion for `today` against `history`.
///
/// Fails with [`Error::AlreadyCompleted`] when `today` is already present;
/// the input is never mutated. On success the returned history contains
/// exactly one more marker than the input and is sorted oldest-first,
/// regardless of the input order.
pub fn record_completion(history: &[Day], today: Day) -> Result<Completion> {
  if history.contains(&today) {
    return Err(Error::AlreadyCompleted(today));
  }

  let mut days = history.to_vec();
  days.push(today);
  days.sort_unstable();

  let streak = streak_ending_at(&days, today);
  Ok(Completion { history: days, streak })
}

/// Count the consecutive run of days ending at `today` in an ascending
/// history.
///
/// Scans backward from the latest marker; stops at the first gap, so the
/// cost is proportional to the streak length, not the history length. The
/// streak is recomputed from the full history on every mutation rather than
/// incremented in place, so an externally edited history can never leave a
/// stale counter behind.
pub fn streak_ending_at(sorted: &[Day], today: Day) -> u32 {
  let mut streak = 0;
  let mut expected = today;

  for day in sorted.iter().rev().copied() {
    if day != expected {
      break;
    }
    streak += 1;
    match expected.pred() {
      Some(prev) => expected = prev,
      None => break,
    }
  }

  streak
}
