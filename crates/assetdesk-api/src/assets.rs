//! Handlers for `/assets` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/assets` | `?status=&category=&assigned_to=&text=` |
//! | `POST`   | `/assets` | Body: [`NewAsset`]; 422 on missing name/serial |
//! | `GET`    | `/assets/{id}` | 404 if not found |
//! | `PATCH`  | `/assets/{id}` | Body: [`AssetEdit`] |
//! | `DELETE` | `/assets/{id}` | 204, or 404 if not found |
//! | `POST`   | `/assets/assign` | Body: `{"asset_ids":[..],"employee_id":..,"date":..}` |
//! | `POST`   | `/assets/{id}/transfer` | Body: `{"employee_id":..,"date":..}`; actor from `X-Actor` |
//! | `POST`   | `/assets/{id}/status` | Body: `{"status":"maintenance"}` |
//! | `POST`   | `/assets/{id}/unassign` | |
//! | `GET`    | `/assets/{id}/history` | Usage report |

use std::collections::BTreeMap;

use assetdesk_core::{
  asset::{Asset, AssetCategory, AssetPatch, AssetStatus, NewAsset, Purchase},
  lifecycle::{self, UsageReport},
  schedule::TaskNotifier,
  store::{AssetFilter, RecordStore},
};
use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, actor::CurrentActor, error::{ApiError, JsonBody}, today};

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("asset {id} not found")) }

// ─── CRUD ────────────────────────────────────────────────────────────────────

/// `GET /assets`
pub async fn list<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Query(filter): Query<AssetFilter>,
) -> Result<Json<Vec<Asset>>, ApiError> {
  let assets = state.store.list_assets(&filter).await.map_err(ApiError::store)?;
  Ok(Json(assets))
}

/// `POST /assets`
pub async fn create<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(body): JsonBody<NewAsset>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let asset = state.store.insert_asset(body).await.map_err(ApiError::store)?;
  tracing::info!(asset_id = %asset.asset_id, serial = %asset.serial_number, "asset created");
  Ok((StatusCode::CREATED, Json(asset)))
}

/// `GET /assets/{id}`
pub async fn get_one<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Asset>, ApiError> {
  let asset = state
    .store
    .get_asset(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(asset))
}

/// Fields editable through `PATCH`. The serial number, the assignment and
/// the history only change through the lifecycle endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEdit {
  pub name:           Option<String>,
  pub category:       Option<AssetCategory>,
  #[serde(default, deserialize_with = "assetdesk_core::nullable::deserialize")]
  pub brand:          Option<Option<String>>,
  #[serde(default, deserialize_with = "assetdesk_core::nullable::deserialize")]
  pub model:          Option<Option<String>>,
  pub status:         Option<AssetStatus>,
  pub specifications: Option<BTreeMap<String, String>>,
  pub purchase:       Option<Purchase>,
  #[serde(default, deserialize_with = "assetdesk_core::nullable::deserialize")]
  pub location:       Option<Option<String>>,
  #[serde(default, deserialize_with = "assetdesk_core::nullable::deserialize")]
  pub description:    Option<Option<String>>,
}

impl From<AssetEdit> for AssetPatch {
  fn from(e: AssetEdit) -> Self {
    AssetPatch {
      name: e.name,
      category: e.category,
      brand: e.brand,
      model: e.model,
      status: e.status,
      specifications: e.specifications,
      purchase: e.purchase,
      location: e.location,
      description: e.description,
      ..AssetPatch::default()
    }
  }
}

/// `PATCH /assets/{id}`
pub async fn edit<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<AssetEdit>,
) -> Result<Json<Asset>, ApiError> {
  if body.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
    return Err(ApiError::BadRequest("name must not be empty".into()));
  }
  let asset = state
    .store
    .update_asset(id, body.into())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(asset))
}

/// `DELETE /assets/{id}`
pub async fn remove<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if state.store.delete_asset(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssignBody {
  pub asset_ids:   Vec<Uuid>,
  pub employee_id: Uuid,
  /// Defaults to today.
  #[serde(default)]
  pub date:        Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignResult {
  pub assigned: usize,
}

/// `POST /assets/assign`
pub async fn assign<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(body): JsonBody<AssignBody>,
) -> Result<Json<AssignResult>, ApiError> {
  let date = body.date.unwrap_or_else(today);
  let assigned = lifecycle::assign(&*state.store, &body.asset_ids, body.employee_id, date).await?;
  Ok(Json(AssignResult { assigned }))
}

#[derive(Debug, Deserialize)]
pub struct TransferBody {
  pub employee_id: Uuid,
  #[serde(default)]
  pub date:        Option<NaiveDate>,
}

/// `POST /assets/{id}/transfer`
pub async fn transfer<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  CurrentActor(actor): CurrentActor,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<TransferBody>,
) -> Result<Json<Asset>, ApiError> {
  let date = body.date.unwrap_or_else(today);
  let asset = lifecycle::transfer(&*state.store, &actor, id, body.employee_id, date).await?;
  Ok(Json(asset))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: AssetStatus,
}

/// `POST /assets/{id}/status`
pub async fn set_status<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Asset>, ApiError> {
  let asset = lifecycle::set_status(&*state.store, id, body.status).await?;
  Ok(Json(asset))
}

/// `POST /assets/{id}/unassign`
pub async fn unassign<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Asset>, ApiError> {
  let asset = lifecycle::unassign(&*state.store, id).await?;
  Ok(Json(asset))
}

// ─── Usage report ────────────────────────────────────────────────────────────

/// `GET /assets/{id}/history`
pub async fn history<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<UsageReport>, ApiError> {
  let report = lifecycle::usage_report(&*state.store, id).await?;
  Ok(Json(report))
}
