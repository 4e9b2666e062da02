//! The singleton user profile.

use serde::{Deserialize, Serialize};

/// Primary key of the one and only profile row.
pub const PROFILE_ID: i64 = 1;

/// Streak and fail counters for the tracked user.
///
/// Exactly one profile exists for the lifetime of a store. It is created when
/// the schema is applied and is only ever updated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  /// Successes logged since the most recent fail.
  pub streak_days: u32,
  /// Total fails ever logged. Never decreases.
  pub fail_count:  u32,
}
