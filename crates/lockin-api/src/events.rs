//! Handlers for the write endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/fail-event` | Body: `{"video_url":"..."}` (optional); returns 201 |
//! | `POST` | `/log-success` | No body; returns 201 |
//!
//! Both report storage failures themselves as
//! `500 {"status":"error","message":...}` rather than through [`ApiError`](crate::ApiError).

use std::fmt::Display;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
};
use lockin_core::{
  event::{FailEvent, NewFailEvent},
  profile::UserProfile,
  store::{TrackerSession, TrackerStore},
};
use serde::{Deserialize, Serialize};

use crate::AppState;

// ─── Response body ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusReply {
  pub status:  &'static str,
  pub message: String,
}

pub type StatusResponse = (StatusCode, Json<StatusReply>);

impl StatusReply {
  fn created(message: &str) -> StatusResponse {
    (
      StatusCode::CREATED,
      Json(Self { status: "success", message: message.to_string() }),
    )
  }

  fn failed(status: StatusCode, err: impl Display) -> StatusResponse {
    (status, Json(Self { status: "error", message: err.to_string() }))
  }
}

// ─── Fail ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct FailEventBody {
  /// `null` and absent both mean no video.
  #[serde(default)]
  pub video_url: Option<String>,
}

/// `POST /fail-event` — logs the event and resets the streak atomically.
///
/// A request without a JSON content type is treated as an empty body.
pub async fn log_fail<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<FailEventBody>, JsonRejection>,
) -> StatusResponse
where
  S: TrackerStore + Clone + 'static,
{
  let body = match body {
    Ok(Json(body)) => body,
    Err(JsonRejection::MissingJsonContentType(_)) => FailEventBody::default(),
    Err(rejection) => {
      return StatusReply::failed(rejection.status(), rejection.body_text());
    }
  };

  let input = NewFailEvent::manual(body.video_url.unwrap_or_default());
  match record_fail(&*state.store, input).await {
    Ok((event, profile)) => {
      tracing::info!(
        event_id = event.id,
        fail_count = profile.fail_count,
        "fail event logged"
      );
      StatusReply::created("Fail event logged")
    }
    Err(e) => {
      tracing::error!(error = %e, "error logging fail event");
      StatusReply::failed(StatusCode::INTERNAL_SERVER_ERROR, e)
    }
  }
}

async fn record_fail<S: TrackerStore>(
  store: &S,
  input: NewFailEvent,
) -> Result<(FailEvent, UserProfile), S::Error> {
  let session = store.session().await?;
  session.record_fail(input).await
}

// ─── Success ──────────────────────────────────────────────────────────────────

/// `POST /log-success` — extends the streak by one day.
pub async fn log_success<S>(State(state): State<AppState<S>>) -> StatusResponse
where
  S: TrackerStore + Clone + 'static,
{
  match record_success(&*state.store).await {
    Ok(profile) => {
      tracing::info!(streak_days = profile.streak_days, "success logged");
      StatusReply::created("Streak updated")
    }
    Err(e) => {
      tracing::error!(error = %e, "error logging success");
      StatusReply::failed(StatusCode::INTERNAL_SERVER_ERROR, e)
    }
  }
}

async fn record_success<S: TrackerStore>(store: &S) -> Result<UserProfile, S::Error> {
  let session = store.session().await?;
  session.record_success().await
}
