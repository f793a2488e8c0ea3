//! [`Day`] — a calendar day with no time-of-day component.
//!
//! Completion markers are compared and sorted by calendar identity (year,
//! month, day). The persisted and wire representation is the `DD-MM-YYYY`
//! string the storage layer has always used; that codec lives here and
//! nowhere else, so no other code ever compares dates as strings.

use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// Day-month-year, to match the stored history format. Not month-day-year.
const DAY_FORMAT: &str = "%d-%m-%Y";

/// A calendar day. Ordering is chronological (year, then month, then day),
/// never textual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
  /// Build a day from its components. `None` for impossible dates
  /// (e.g. 31-02).
  pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
    NaiveDate::from_ymd_opt(year, month, day).map(Self)
  }

  /// The current date on the server's local clock.
  pub fn today() -> Self { Self(Local::now().date_naive()) }

  /// The previous calendar day. `None` only at the representable minimum.
  pub fn pred(self) -> Option<Self> { self.0.pred_opt().map(Self) }
}

impl fmt::Display for Day {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(DAY_FORMAT))
  }
}

impl FromStr for Day {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
      .map(Self)
      .map_err(|_| Error::InvalidDay(s.to_string()))
  }
}

impl Serialize for Day {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Day {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}
