//! Handlers for `/employees` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/employees` | `?department_id=&status=&text=` |
//! | `POST`   | `/employees` | Body: [`NewEmployee`]; 422 on missing fields |
//! | `GET`    | `/employees/{id}` | With department name and assigned assets |
//! | `PATCH`  | `/employees/{id}` | Body: [`EmployeePatch`] |
//! | `DELETE` | `/employees/{id}` | 204, or 404 if not found |
//! | `PUT`    | `/employees/{id}/accessories/{key}` | Body: `{"held":true}` |

use assetdesk_core::{
  asset::Asset,
  employee::{AccessoryMap, Employee, EmployeePatch, NewEmployee},
  ledger,
  schedule::TaskNotifier,
  store::{AssetFilter, EmployeeFilter, RecordStore},
};
use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::{ApiError, JsonBody}};

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("employee {id} not found")) }

/// `GET /employees`
pub async fn list<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Query(filter): Query<EmployeeFilter>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let employees = state.store.list_employees(&filter).await.map_err(ApiError::store)?;
  Ok(Json(employees))
}

/// `POST /employees`
pub async fn create<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  JsonBody(body): JsonBody<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let employee = state.store.insert_employee(body).await.map_err(ApiError::store)?;
  tracing::info!(employee_id = %employee.employee_id, "employee created");
  Ok((StatusCode::CREATED, Json(employee)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeDetail {
  #[serde(flatten)]
  pub employee:        Employee,
  /// Empty when the department does not resolve.
  pub department_name: String,
  pub assets:          Vec<Asset>,
}

/// `GET /employees/{id}`
pub async fn get_one<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<EmployeeDetail>, ApiError> {
  let employee = state
    .store
    .get_employee(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;

  let department_name = match employee.department_id {
    Some(dept) => state
      .store
      .get_department(dept)
      .await
      .map_err(ApiError::store)?
      .map(|d| d.name)
      .unwrap_or_default(),
    None => String::new(),
  };
  let assets = state
    .store
    .list_assets(&AssetFilter::assigned_to(id))
    .await
    .map_err(ApiError::store)?;

  Ok(Json(EmployeeDetail { employee, department_name, assets }))
}

/// `PATCH /employees/{id}`
pub async fn edit<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
  JsonBody(body): JsonBody<EmployeePatch>,
) -> Result<Json<Employee>, ApiError> {
  let employee = state
    .store
    .update_employee(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

/// `DELETE /employees/{id}`
pub async fn remove<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  if state.store.delete_employee(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}

#[derive(Debug, Deserialize)]
pub struct AccessoryBody {
  pub held: bool,
}

/// `PUT /employees/{id}/accessories/{key}`. Returns the stored map.
pub async fn set_accessory<S: RecordStore, N: TaskNotifier>(
  State(state): State<AppState<S, N>>,
  Path((id, key)): Path<(Uuid, String)>,
  JsonBody(body): JsonBody<AccessoryBody>,
) -> Result<Json<AccessoryMap>, ApiError> {
  let map = ledger::set_accessory(&*state.store, id, &key, body.held).await?;
  Ok(Json(map))
}
