//! Fail events — the append-only log of reported lapses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason recorded for every fail reported through the API.
pub const MANUAL_FAIL_REASON: &str = "User manual fail report";

/// A persisted fail event. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailEvent {
  pub id:        i64,
  pub reason:    String,
  pub video_url: Option<String>,
  pub timestamp: DateTime<Utc>,
}

/// Input for recording a fail event; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFailEvent {
  pub reason:    String,
  pub video_url: Option<String>,
  /// Creation time. The store uses its own clock when `None`.
  pub timestamp: Option<DateTime<Utc>>,
}

impl NewFailEvent {
  /// A user-reported fail. An empty `video_url` is recorded as absent.
  pub fn manual(video_url: impl Into<String>) -> Self {
    let video_url = video_url.into();
    Self {
      reason:    MANUAL_FAIL_REASON.to_owned(),
      video_url: (!video_url.is_empty()).then_some(video_url),
      timestamp: None,
    }
  }

  /// Override the creation time.
  pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
    self.timestamp = Some(timestamp);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn manual_event_uses_fixed_reason() {
    let event = NewFailEvent::manual("http://x/1.mp4");
    assert_eq!(event.reason, MANUAL_FAIL_REASON);
    assert_eq!(event.video_url.as_deref(), Some("http://x/1.mp4"));
    assert!(event.timestamp.is_none());
  }

  #[test]
  fn empty_video_url_is_absent() {
    assert!(NewFailEvent::manual("").video_url.is_none());
  }
}
