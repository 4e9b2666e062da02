//! Handler for `POST /coach/message`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use lockin_core::store::TrackerStore;
use serde::Serialize;
use serde_json::Value;

use crate::{AppState, error::ApiError};

/// The fields read from a coach request body.
#[derive(Debug, PartialEq, Eq)]
pub struct CoachBody {
  pub user_input: String,
  pub streak:     i64,
}

impl CoachBody {
  /// Read a request body leniently.
  ///
  /// `None` only when the body is not an object or has no `user_input` key.
  /// A non-string `user_input` is used as its JSON text, and a `streak` that
  /// is absent or not an integer counts as 0.
  pub fn from_value(body: &Value) -> Option<Self> {
    let fields = body.as_object()?;
    let user_input = match fields.get("user_input")? {
      Value::String(s) => s.clone(),
      other => other.to_string(),
    };
    let streak = fields.get("streak").and_then(Value::as_i64).unwrap_or(0);
    Some(Self { user_input, streak })
  }
}

#[derive(Debug, Serialize)]
pub struct CoachReply {
  pub coach_reply: String,
}

/// `POST /coach/message` — body: `{"user_input":"...","streak":3}`.
///
/// Always answers 200 once `user_input` is present; coaching-service failures
/// come back as fallback text in `coach_reply`.
pub async fn message<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CoachReply>, ApiError>
where
  S: TrackerStore + Clone + 'static,
{
  let Some(CoachBody { user_input, streak }) = body
    .ok()
    .and_then(|Json(value)| CoachBody::from_value(&value))
  else {
    return Err(ApiError::BadRequest("Missing user_input".to_string()));
  };

  let coach_reply = state.coach.respond(streak, &user_input).await;
  Ok(Json(CoachReply { coach_reply }))
}
