//! Error type for `lockin-coach`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No connection could be established to the chat service.
  #[error("coaching service unreachable: {0}")]
  Unreachable(#[source] reqwest::Error),

  #[error("coaching service request failed: {0}")]
  Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for Error {
  fn from(e: reqwest::Error) -> Self {
    if e.is_connect() {
      Error::Unreachable(e)
    } else {
      Error::Request(e)
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
