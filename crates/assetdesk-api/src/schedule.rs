//! `POST /schedule`: quick maintenance scheduling.
//!
//! Body: [`ScheduleRequest`]. The configured task notifier is called best
//! effort; the response carries the calendar link either way.

use assetdesk_core::{
  schedule::{self, ScheduleRequest, Scheduled, TaskNotifier},
  store::RecordStore,
};
use axum::{Json, extract::State};

use crate::{AppState, error::{ApiError, JsonBody}};

pub async fn handler<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(request): JsonBody<ScheduleRequest>,
) -> Result<Json<Scheduled>, ApiError> {
  let scheduled = schedule::quick_schedule(&*state.notifier, request).await?;
  Ok(Json(scheduled))
}
