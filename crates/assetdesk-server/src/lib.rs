//! HTTP server wiring for the asset desk: configuration, the ClickUp task
//! notifier, and the top-level router.

use std::path::{Path, PathBuf};

use assetdesk_api::AppState;
use assetdesk_core::{
  schedule::{ScheduledEvent, TaskNotifier},
  store::RecordStore,
};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ASSETDESK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub clickup:    Option<ClickUpConfig>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

#[derive(Debug, Deserialize, Clone)]
pub struct ClickUpConfig {
  pub list_id:   String,
  pub token:     String,
  #[serde(default)]
  pub assignees: Vec<u64>,
  #[serde(default = "default_clickup_api")]
  pub api_base:  String,
}

fn default_clickup_api() -> String { "https://api.clickup.com/api/v2".to_owned() }

impl ServerConfig {
  /// Layer the optional file at `path` under `ASSETDESK_*` environment
  /// variables (nested keys separated by `__`).
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ASSETDESK")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── ClickUp notifier ────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
  #[error("ClickUp request failed: {0}")]
  Http(#[from] reqwest::Error),
}

/// Creates a ClickUp task for each scheduled event. Without configuration
/// every notification succeeds without a request.
#[derive(Debug, Clone)]
pub struct ClickUpNotifier {
  client: reqwest::Client,
  config: Option<ClickUpConfig>,
}

impl ClickUpNotifier {
  pub fn new(config: Option<ClickUpConfig>) -> Self {
    Self { client: reqwest::Client::new(), config }
  }
}

/// The ClickUp "create task" body for `event`.
pub fn task_payload(event: &ScheduledEvent, assignees: &[u64]) -> Value {
  json!({
    "name": event.summary,
    "description": event.description,
    "assignees": assignees,
    "start_date": event.start.timestamp_millis(),
    "due_date": event.end.timestamp_millis(),
    "start_date_time": true,
    "due_date_time": true,
    "status": "to do",
  })
}

impl TaskNotifier for ClickUpNotifier {
  type Error = NotifyError;

  async fn notify(&self, event: &ScheduledEvent) -> Result<(), NotifyError> {
    let Some(cfg) = &self.config else {
      tracing::debug!("ClickUp not configured; skipping task creation");
      return Ok(());
    };

    let url = format!("{}/list/{}/task", cfg.api_base.trim_end_matches('/'), cfg.list_id);
    self
      .client
      .post(&url)
      .header(reqwest::header::AUTHORIZATION, &cfg.token)
      .json(&task_payload(event, &cfg.assignees))
      .send()
      .await?
      .error_for_status()?;
    Ok(())
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// The full application: `/health` plus the JSON API under `/api`, with
/// request tracing.
pub fn router<S, N>(state: AppState<S, N>) -> Router
where
  S: RecordStore + 'static,
  N: TaskNotifier + 'static,
{
  Router::new()
    .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
    .nest("/api", assetdesk_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
