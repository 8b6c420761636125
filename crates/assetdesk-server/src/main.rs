//! assetdesk-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `ASSETDESK_*` environment variables, opens the SQLite store, and serves
//! the JSON API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use assetdesk_api::AppState;
use assetdesk_server::{ClickUpNotifier, ServerConfig, expand_tilde};
use assetdesk_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "AssetDesk equipment tracking server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;
  let store_path = expand_tilde(&server_cfg.store_path);

  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.clickup.is_none() {
    tracing::info!("ClickUp not configured; scheduled tasks will not be created");
  }
  let notifier = ClickUpNotifier::new(server_cfg.clickup.clone());

  let app = assetdesk_server::router(AppState::new(store, notifier));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
