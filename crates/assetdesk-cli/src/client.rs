//! Async HTTP client wrapping the asset desk JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use assetdesk_core::{
  asset::{Asset, AssetStatus},
  dashboard::DashboardView,
  employee::{AccessoryMap, Employee},
  lifecycle::UsageReport,
  schedule::{ScheduleRequest, Scheduled},
  store::{AssetFilter, EmployeeFilter},
  term::{TermDocument, TermRequest},
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use uuid::Uuid;

/// Connection settings for the asset desk API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Sent as `X-Actor`; recorded on transfer history.
  pub actor:    Option<String>,
}

/// Async HTTP client for the asset desk JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct AssignResult {
  assigned: usize,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn actor(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.config.actor {
      Some(actor) => req.header("x-actor", actor),
      None => req,
    }
  }

  /// Send `req` and decode a JSON success body. Error bodies carry
  /// `{"error": "..."}`, which is surfaced as the error message.
  async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
    let resp = self.actor(req).send().await.with_context(|| format!("{what} failed"))?;
    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_default();
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp.json().await.with_context(|| format!("deserialising {what} response"))
  }

  // ── Assets ────────────────────────────────────────────────────────────────

  /// `GET /api/assets`
  pub async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
    let req = self.client.get(self.url("/assets")).query(filter);
    self.send(req, "GET /assets").await
  }

  /// `POST /api/assets/assign`
  pub async fn assign(
    &self,
    asset_ids: &[Uuid],
    employee_id: Uuid,
    date: Option<NaiveDate>,
  ) -> Result<usize> {
    let req = self.client.post(self.url("/assets/assign")).json(&json!({
      "asset_ids": asset_ids,
      "employee_id": employee_id,
      "date": date,
    }));
    let result: AssignResult = self.send(req, "POST /assets/assign").await?;
    Ok(result.assigned)
  }

  /// `POST /api/assets/{id}/transfer`
  pub async fn transfer(
    &self,
    asset_id: Uuid,
    employee_id: Uuid,
    date: Option<NaiveDate>,
  ) -> Result<Asset> {
    let req = self
      .client
      .post(self.url(&format!("/assets/{asset_id}/transfer")))
      .json(&json!({ "employee_id": employee_id, "date": date }));
    self.send(req, "POST /assets/{id}/transfer").await
  }

  /// `POST /api/assets/{id}/status`
  pub async fn set_status(&self, asset_id: Uuid, status: AssetStatus) -> Result<Asset> {
    let req = self
      .client
      .post(self.url(&format!("/assets/{asset_id}/status")))
      .json(&json!({ "status": status }));
    self.send(req, "POST /assets/{id}/status").await
  }

  /// `POST /api/assets/{id}/unassign`
  pub async fn unassign(&self, asset_id: Uuid) -> Result<Asset> {
    let req = self.client.post(self.url(&format!("/assets/{asset_id}/unassign")));
    self.send(req, "POST /assets/{id}/unassign").await
  }

  /// `GET /api/assets/{id}/history`
  pub async fn history(&self, asset_id: Uuid) -> Result<UsageReport> {
    let req = self.client.get(self.url(&format!("/assets/{asset_id}/history")));
    self.send(req, "GET /assets/{id}/history").await
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  /// `GET /api/employees`
  pub async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
    let req = self.client.get(self.url("/employees")).query(filter);
    self.send(req, "GET /employees").await
  }

  /// `PUT /api/employees/{id}/accessories/{key}`
  pub async fn set_accessory(&self, employee_id: Uuid, key: &str, held: bool) -> Result<AccessoryMap> {
    let mut url = reqwest::Url::parse(&self.url(&format!("/employees/{employee_id}/accessories")))
      .context("invalid base URL")?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("base URL cannot carry a path"))?
      .push(key);
    let req = self.client.put(url).json(&json!({ "held": held }));
    self.send(req, "PUT /employees/{id}/accessories/{key}").await
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// `POST /api/terms`
  pub async fn term(&self, request: &TermRequest) -> Result<TermDocument> {
    let req = self.client.post(self.url("/terms")).json(request);
    self.send(req, "POST /terms").await
  }

  /// `GET /api/dashboard`
  pub async fn dashboard(&self) -> Result<DashboardView> {
    let req = self.client.get(self.url("/dashboard"));
    self.send(req, "GET /dashboard").await
  }

  /// `POST /api/schedule`
  pub async fn schedule(&self, request: &ScheduleRequest) -> Result<Scheduled> {
    let req = self.client.post(self.url("/schedule")).json(request);
    self.send(req, "POST /schedule").await
  }
}
