//! The `TrackerStore` / `TrackerSession` traits.
//!
//! A store hands out one session per inbound request. Everything a request
//! reads or writes goes through that session, and the underlying connection is
//! released when the session is dropped.

use std::future::Future;

use crate::{
  event::{FailEvent, NewFailEvent},
  profile::UserProfile,
  stats::DailyFails,
};

/// Abstraction over a tracker storage backend.
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
  type Session: TrackerSession<Error = Self::Error>;

  /// Acquire a request-scoped session.
  fn session(
    &self,
  ) -> impl Future<Output = Result<Self::Session, Self::Error>> + Send + '_;
}

/// A request-scoped handle on the store.
pub trait TrackerSession: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the singleton profile. `None` if the row is missing.
  fn profile(
    &self,
  ) -> impl Future<Output = Result<Option<UserProfile>, Self::Error>> + Send + '_;

  /// Fail counts per calendar date over the last `window_days` days, in
  /// ascending date order. Dates without fails are not returned.
  fn daily_fails(
    &self,
    window_days: u32,
  ) -> impl Future<Output = Result<Vec<DailyFails>, Self::Error>> + Send + '_;

  /// Append a fail event, reset the streak and bump the fail counter, all in
  /// one transaction. Returns the stored event and the updated profile.
  fn record_fail(
    &self,
    input: NewFailEvent,
  ) -> impl Future<Output = Result<(FailEvent, UserProfile), Self::Error>> + Send + '_;

  /// Extend the streak by one. Returns the updated profile.
  fn record_success(
    &self,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// The most recent fail events, newest first.
  fn recent_fail_events(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<FailEvent>, Self::Error>> + Send + '_;
}
