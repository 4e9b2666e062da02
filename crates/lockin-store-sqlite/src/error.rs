//! Error type for `lockin-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The singleton profile row is gone; the write was rolled back.
  #[error("user profile row is missing")]
  ProfileMissing,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
