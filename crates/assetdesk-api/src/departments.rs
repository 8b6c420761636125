//! Handlers for `/departments` endpoints. Departments list by name.

use assetdesk_core::{
  department::{Department, DepartmentPatch, NewDepartment},
  schedule::TaskNotifier,
  store::RecordStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;

use crate::{AppState, error::{ApiError, JsonBody}};

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("department {id} not found")) }

/// `GET /departments`
pub async fn list<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
) -> Result<Json<Vec<Department>>, ApiError> {
  let departments = state.store.list_departments().await.map_err(ApiError::store)?;
  Ok(Json(departments))
}

/// `POST /departments`
pub async fn create<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(body): JsonBody<NewDepartment>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let department = state.store.insert_department(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(department)))
}

/// `GET /departments/{id}`
pub async fn get_one<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Department>, ApiError> {
  let department = state
    .store
    .get_department(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(department))
}

/// `PATCH /departments/{id}`
pub async fn edit<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<DepartmentPatch>,
) -> Result<Json<Department>, ApiError> {
  let department = state
    .store
    .update_department(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(department))
}

/// `DELETE /departments/{id}`. Employees keep the dangling reference.
pub async fn remove<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if state.store.delete_department(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}
