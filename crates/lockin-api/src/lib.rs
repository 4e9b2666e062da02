//! JSON HTTP API for lockin.
//!
//! Exposes an axum [`Router`] backed by any [`TrackerStore`] and a
//! [`CoachClient`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/get-stats` | [`stats::handler`] |
//! | `POST` | `/fail-event` | [`events::log_fail`] |
//! | `POST` | `/log-success` | [`events::log_success`] |
//! | `POST` | `/coach/message` | [`coach::message`] |
//!
//! Cross-origin requests are allowed from any origin.

pub mod coach;
pub mod error;
pub mod events;
pub mod stats;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lockin_coach::CoachClient;
use lockin_core::store::TrackerStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store: Arc<S>,
  pub coach: Arc<CoachClient>,
}

/// Build the API router.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: TrackerStore + Clone + 'static,
{
  Router::new()
    .route("/get-stats", get(stats::handler::<S>))
    .route("/fail-event", post(events::log_fail::<S>))
    .route("/log-success", post(events::log_success::<S>))
    .route("/coach/message", post(coach::message::<S>))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
