//! The dashboard read model returned by `GET /get-stats`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// Number of days covered by the fail chart.
pub const CHART_WINDOW_DAYS: u32 = 7;

/// Number of fails recorded on one calendar date (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyFails {
  pub date:  NaiveDate,
  pub fails: u32,
}

/// A sparse per-day fail series. Dates without fails are omitted, and labels
/// are in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailChart {
  pub labels: Vec<NaiveDate>,
  pub data:   Vec<u32>,
}

impl FailChart {
  pub fn from_daily(days: impl IntoIterator<Item = DailyFails>) -> Self {
    let mut days: Vec<DailyFails> =
      days.into_iter().filter(|d| d.fails > 0).collect();
    days.sort_by_key(|d| d.date);

    Self {
      labels: days.iter().map(|d| d.date).collect(),
      data:   days.iter().map(|d| d.fails).collect(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub streak_days: u32,
  pub fail_count:  u32,
  pub chart:       FailChart,
}

impl Stats {
  pub fn new(profile: UserProfile, days: impl IntoIterator<Item = DailyFails>) -> Self {
    Self {
      streak_days: profile.streak_days,
      fail_count:  profile.fail_count,
      chart:       FailChart::from_daily(days),
    }
  }

  /// Zeroed stats, reported when no profile row exists.
  pub fn empty() -> Self { Self::default() }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn day(d: u32, fails: u32) -> DailyFails {
    DailyFails {
      date: NaiveDate::from_ymd_opt(2026, 3, d).unwrap(),
      fails,
    }
  }

  #[test]
  fn chart_is_sorted_and_sparse() {
    let chart = FailChart::from_daily([day(5, 2), day(3, 1), day(4, 0)]);
    assert_eq!(chart.labels, vec![day(3, 0).date, day(5, 0).date]);
    assert_eq!(chart.data, vec![1, 2]);
  }

  #[test]
  fn stats_serialize_with_camel_case_keys() {
    let profile = UserProfile { streak_days: 4, fail_count: 2 };
    let value = serde_json::to_value(Stats::new(profile, [day(9, 3)])).unwrap();
    assert_eq!(
      value,
      json!({
        "streakDays": 4,
        "failCount": 2,
        "chart": { "labels": ["2026-03-09"], "data": [3] }
      })
    );
  }

  #[test]
  fn empty_stats_shape() {
    let value = serde_json::to_value(Stats::empty()).unwrap();
    assert_eq!(
      value,
      json!({
        "streakDays": 0,
        "failCount": 0,
        "chart": { "labels": [], "data": [] }
      })
    );
  }
}
