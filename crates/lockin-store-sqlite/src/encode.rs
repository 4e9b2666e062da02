//! Conversions between domain types and SQLite column text.
//!
//! Timestamps use SQLite's own `CURRENT_TIMESTAMP` layout so rows written with
//! and without an explicit timestamp compare and group identically.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lockin_core::{event::FailEvent, profile::UserProfile, stats::DailyFails};

use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_timestamp(dt: DateTime<Utc>) -> String {
  dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn decode_timestamp(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
    .map(|dt| dt.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// `SELECT id, reason, video_url, timestamp` row.
pub struct RawFailEvent {
  pub id:        i64,
  pub reason:    String,
  pub video_url: Option<String>,
  pub timestamp: String,
}

impl RawFailEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      reason:    row.get(1)?,
      video_url: row.get(2)?,
      timestamp: row.get(3)?,
    })
  }

  pub fn into_event(self) -> Result<FailEvent> {
    Ok(FailEvent {
      id:        self.id,
      reason:    self.reason,
      video_url: self.video_url,
      timestamp: decode_timestamp(&self.timestamp)?,
    })
  }
}

/// `SELECT DATE(timestamp), COUNT(*)` row.
pub struct RawDailyFails {
  pub date:  String,
  pub fails: u32,
}

impl RawDailyFails {
  pub fn into_daily(self) -> Result<DailyFails> {
    Ok(DailyFails { date: decode_date(&self.date)?, fails: self.fails })
  }
}

/// `streak_days, fail_count` row.
pub fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserProfile> {
  Ok(UserProfile {
    streak_days: row.get(0)?,
    fail_count:  row.get(1)?,
  })
}
