//! Router tests against an in-memory SQLite store.

use assetdesk_core::schedule::NoopNotifier;
use assetdesk_store_sqlite::SqliteStore;
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{AppState, api_router};

type State = AppState<SqliteStore, NoopNotifier>;

async fn make_state() -> State {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  AppState::new(store, NoopNotifier)
}

async fn call(
  state: &State,
  method: &str,
  uri: &str,
  headers: Vec<(&str, &str)>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  for (k, v) in headers {
    builder = builder.header(k, v);
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = api_router(state.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, json)
}

async fn post(state: &State, uri: &str, body: Value) -> (StatusCode, Value) {
  call(state, "POST", uri, vec![], Some(body)).await
}

async fn get(state: &State, uri: &str) -> (StatusCode, Value) {
  call(state, "GET", uri, vec![], None).await
}

fn id(v: &Value, field: &str) -> String { v[field].as_str().unwrap().to_owned() }

/// A department, one employee in it, and one available notebook.
async fn seed(state: &State) -> (String, String) {
  let (_, dept) = post(state, "/departments", json!({ "name": "Financeiro" })).await;
  let (status, emp) = post(
    state,
    "/employees",
    json!({
      "name": "Ana Souza",
      "email": "ana@corp.example",
      "phone": "555-0100",
      "cpf": "123.456.789-00",
      "department_id": id(&dept, "department_id"),
      "position": "Analista",
    }),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let (status, asset) = post(
    state,
    "/assets",
    json!({ "name": "Dell Latitude", "category": "notebook", "serial_number": "DL-1" }),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  (id(&emp, "employee_id"), id(&asset, "asset_id"))
}

// ── Assets ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_asset_requires_serial() {
  let state = make_state().await;
  let (status, body) =
    post(&state, "/assets", json!({ "name": "X", "category": "monitor", "serial_number": "" })).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("serial_number"));
}

#[tokio::test]
async fn legacy_category_spelling_accepted() {
  let state = make_state().await;
  let (status, body) = post(
    &state,
    "/assets",
    json!({ "name": "Kit", "category": "kit teclado | mouse", "serial_number": "K-1" }),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["category"], "teclado_mouse_kit");
}

#[tokio::test]
async fn get_missing_asset_is_404() {
  let state = make_state().await;
  let (status, body) = get(&state, &format!("/assets/{}", Uuid::new_v4())).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn assign_then_filter_by_holder() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;

  let (status, body) = post(
    &state,
    "/assets/assign",
    json!({ "asset_ids": [asset], "employee_id": emp, "date": "2025-03-01" }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["assigned"], 1);

  let (_, list) = get(&state, &format!("/assets?assigned_to={emp}")).await;
  let list = list.as_array().unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0]["status"], "in_use");
  assert_eq!(list[0]["assignment"]["date"], "2025-03-01");
}

#[tokio::test]
async fn assign_unknown_employee_is_422() {
  let state = make_state().await;
  let (_, asset) = seed(&state).await;
  let (status, _) = post(
    &state,
    "/assets/assign",
    json!({ "asset_ids": [asset], "employee_id": Uuid::new_v4() }),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn transfer_records_actor_from_header() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;

  let (status, body) = call(
    &state,
    "POST",
    &format!("/assets/{asset}/transfer"),
    vec![("x-actor", "carla")],
    Some(json!({ "employee_id": emp, "date": "2025-03-02" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["history"][0]["actor"], "carla");
  assert_eq!(body["history"][0]["action"], format!("Transferred to employee {emp}"));

  let (_, report) = get(&state, &format!("/assets/{asset}/history")).await;
  assert_eq!(report["holder"]["name"], "Ana Souza");
  assert_eq!(report["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn transfer_without_header_uses_system() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;
  let (_, body) =
    post(&state, &format!("/assets/{asset}/transfer"), json!({ "employee_id": emp })).await;
  assert_eq!(body["history"][0]["actor"], "System");
}

#[tokio::test]
async fn status_and_unassign() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;
  post(&state, "/assets/assign", json!({ "asset_ids": [asset], "employee_id": emp })).await;

  let (_, body) =
    post(&state, &format!("/assets/{asset}/status"), json!({ "status": "maintenance" })).await;
  assert_eq!(body["status"], "maintenance");

  let (status, body) = call(&state, "POST", &format!("/assets/{asset}/unassign"), vec![], None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["assignment"].is_null());
  assert_eq!(body["status"], "maintenance");
}

#[tokio::test]
async fn patch_cannot_touch_serial() {
  let state = make_state().await;
  let (_, asset) = seed(&state).await;
  let uri = format!("/assets/{asset}");

  let (status, body) =
    call(&state, "PATCH", &uri, vec![], Some(json!({ "serial_number": "NEW" }))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("serial_number"));

  let (status, body) =
    call(&state, "PATCH", &uri, vec![], Some(json!({ "name": "Latitude 7420" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Latitude 7420");
  assert_eq!(body["serial_number"], "DL-1");
}

#[tokio::test]
async fn delete_asset() {
  let state = make_state().await;
  let (_, asset) = seed(&state).await;
  let uri = format!("/assets/{asset}");
  let (status, _) = call(&state, "DELETE", &uri, vec![], None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = call(&state, "DELETE", &uri, vec![], None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Employees ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn employee_detail_includes_department_and_assets() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;
  post(&state, "/assets/assign", json!({ "asset_ids": [asset], "employee_id": emp })).await;

  let (status, body) = get(&state, &format!("/employees/{emp}")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["department_name"], "Financeiro");
  assert_eq!(body["assets"].as_array().unwrap().len(), 1);
  assert_eq!(body["name"], "Ana Souza");
}

#[tokio::test]
async fn create_employee_requires_department() {
  let state = make_state().await;
  let (status, _) = post(
    &state,
    "/employees",
    json!({ "name": "B", "email": "b@x", "phone": "1", "position": "Dev" }),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn accessory_put_returns_map() {
  let state = make_state().await;
  let (emp, _) = seed(&state).await;
  let (status, body) = call(
    &state,
    "PUT",
    &format!("/employees/{emp}/accessories/webcam"),
    vec![],
    Some(json!({ "held": true })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["webcam"], true);
  assert_eq!(body["teclado"], false);
}

// ── Terms, dashboard, schedule ───────────────────────────────────────────────

#[tokio::test]
async fn responsibility_term_document() {
  let state = make_state().await;
  let (emp, asset) = seed(&state).await;
  post(&state, "/assets/assign", json!({ "asset_ids": [asset], "employee_id": emp })).await;

  let (status, doc) = post(
    &state,
    "/terms",
    json!({
      "term_type": "responsibility",
      "employee_id": emp,
      "accessories": ["mouse"],
      "delivery_date": "2025-03-05",
    }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(doc["line_items"][0], "• Dell Latitude - notebook - Serial: DL-1");
  assert_eq!(doc["line_items"][1], "• Mouse");
  let body = doc["body"].as_str().unwrap();
  assert!(body.contains("CPF 123.456.789-00"));
  assert!(body.contains("Data de Entrega: 05/03/2025"));
}

#[tokio::test]
async fn empty_term_is_422() {
  let state = make_state().await;
  let (emp, _) = seed(&state).await;
  let (status, _) = post(
    &state,
    "/terms",
    json!({ "term_type": "return", "employee_id": emp, "accessories": [] }),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn dashboard_counts() {
  let state = make_state().await;
  seed(&state).await;
  let (status, body) = get(&state, "/dashboard").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["stats"]["total_assets"], 1);
  assert_eq!(body["stats"]["available"], 1);
  assert_eq!(body["by_category"]["notebook"], 1);
  assert!(body["activity"][0]["time_ago"].as_str().unwrap().starts_with("há "));
}

#[tokio::test]
async fn schedule_returns_calendar_link() {
  let state = make_state().await;
  let (status, body) = post(
    &state,
    "/schedule",
    json!({ "start": "2025-06-25T13:00:00Z", "end": "2025-06-25T14:00:00Z" }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let url = body["calendar_url"].as_str().unwrap();
  assert!(url.contains("dates=20250625T130000Z/20250625T140000Z"));
  assert_eq!(body["event"]["summary"], "Manutenção de Equipamento");

  let (status, _) = post(&state, "/schedule", json!({ "start": "2025-06-25T13:00:00Z" })).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
  let state = make_state().await;
  let req = Request::builder()
    .method("POST")
    .uri("/departments")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"name\": "))
    .unwrap();
  let resp = api_router(state.clone()).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string());

  let (status, body) = call(&state, "POST", "/assets/assign", vec![], Some(json!({}))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("asset_ids"));
}
