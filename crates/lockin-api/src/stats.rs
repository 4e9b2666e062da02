//! Handler for `GET /get-stats`.

use axum::{Json, extract::State};
use lockin_core::{
  stats::{CHART_WINDOW_DAYS, Stats},
  store::{TrackerSession, TrackerStore},
};

use crate::{AppState, error::ApiError};

/// `GET /get-stats` — profile counters plus the sparse 7-day fail chart.
///
/// A missing profile row reads as zeroed stats with an empty chart.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Stats>, ApiError>
where
  S: TrackerStore + Clone + 'static,
{
  let session = state.store.session().await.map_err(ApiError::store)?;

  let Some(profile) = session.profile().await.map_err(ApiError::store)? else {
    return Ok(Json(Stats::empty()));
  };

  let days = session
    .daily_fails(CHART_WINDOW_DAYS)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(Stats::new(profile, days)))
}
