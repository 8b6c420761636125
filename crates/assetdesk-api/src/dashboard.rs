//! `GET /dashboard`: counts and recent activity.

use assetdesk_core::{
  dashboard::{self, DashboardView},
  schedule::TaskNotifier,
  store::RecordStore,
};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{AppState, error::ApiError};

pub async fn handler<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
) -> Result<Json<DashboardView>, ApiError> {
  let summary = dashboard::load(&*state.store).await?;
  Ok(Json(summary.view(Utc::now())))
}
