//! `POST /terms`: assemble a term document from current state.
//!
//! Body: [`TermRequest`]. Nothing is stored; the same request against the
//! same data yields the same document. 422 when no employee is chosen or
//! the selection is empty.

use assetdesk_core::{
  schedule::TaskNotifier,
  store::RecordStore,
  term::{self, TermDocument, TermRequest},
};
use axum::{Json, extract::State};

use crate::{AppState, error::{ApiError, JsonBody}, today};

pub async fn generate<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(request): JsonBody<TermRequest>,
) -> Result<Json<TermDocument>, ApiError> {
  let document = term::generate(&*state.store, request, today()).await?;
  Ok(Json(document))
}
