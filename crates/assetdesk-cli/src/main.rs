//! `assetdesk`, a command-line client for the asset desk server.
//!
//! # Usage
//!
//! ```text
//! assetdesk --url http://localhost:8080 assets --status available
//! assetdesk --actor maria transfer <asset-id> --employee <employee-id>
//! assetdesk term responsibility --employee <id> --accessory mouse > termo.txt
//! ```

mod client;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use assetdesk_core::{
  asset::{AssetCategory, AssetStatus},
  employee::EmployeeStatus,
  schedule::ScheduleRequest,
  store::{AssetFilter, EmployeeFilter},
  term::{TermRequest, TermType},
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "assetdesk", about = "Command-line client for the asset desk server")]
struct Args {
  /// Path to a TOML config file (url, actor).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the server (default: http://localhost:8080).
  #[arg(long, env = "ASSETDESK_URL")]
  url: Option<String>,

  /// Name recorded as the actor on transfers.
  #[arg(long, env = "ASSETDESK_ACTOR")]
  actor: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List assets.
  Assets {
    #[arg(long)]
    status:   Option<AssetStatus>,
    #[arg(long)]
    category: Option<AssetCategory>,
    /// Only assets held by this employee.
    #[arg(long)]
    holder:   Option<Uuid>,
    /// Match against name or serial number.
    #[arg(long)]
    text:     Option<String>,
  },
  /// List employees.
  Employees {
    #[arg(long)]
    department: Option<Uuid>,
    #[arg(long)]
    status:     Option<EmployeeStatus>,
    #[arg(long)]
    text:       Option<String>,
  },
  /// Assign available assets to an employee.
  Assign {
    #[arg(long)]
    employee: Uuid,
    /// Hand-over date (default: today).
    #[arg(long)]
    date:     Option<NaiveDate>,
    #[arg(required = true)]
    assets:   Vec<Uuid>,
  },
  /// Move an asset to another employee, recording history.
  Transfer {
    asset:    Uuid,
    #[arg(long)]
    employee: Uuid,
    #[arg(long)]
    date:     Option<NaiveDate>,
  },
  /// Set an asset's status.
  Status { asset: Uuid, status: AssetStatus },
  /// Release an asset from its holder.
  Unassign { asset: Uuid },
  /// Show an asset's holder and history.
  History { asset: Uuid },
  /// Mark an accessory as held or returned.
  Accessory {
    employee: Uuid,
    key:      String,
    #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
    held:     bool,
  },
  /// Generate a term document and print its body.
  Term {
    term_type:   TermType,
    #[arg(long)]
    employee:    Uuid,
    /// Extra available asset to include (repeatable).
    #[arg(long = "asset")]
    assets:      Vec<Uuid>,
    /// Accessory key to include (repeatable). Defaults to those held.
    #[arg(long = "accessory")]
    accessories: Vec<String>,
    #[arg(long)]
    delivery:    Option<NaiveDate>,
    #[arg(long = "return-date")]
    return_date: Option<NaiveDate>,
    /// Write the body to a file instead of stdout.
    #[arg(short, long)]
    out:         Option<PathBuf>,
  },
  /// Show counts and recent activity.
  Dashboard,
  /// Schedule equipment maintenance and print the calendar link.
  Schedule {
    #[arg(long)]
    start:       DateTime<Utc>,
    #[arg(long)]
    end:         DateTime<Utc>,
    #[arg(long, default_value = "")]
    summary:     String,
    #[arg(long, default_value = "")]
    description: String,
  },
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:   String,
  #[serde(default)]
  actor: String,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    actor:    args
      .actor
      .or_else(|| (!file_cfg.actor.is_empty()).then(|| file_cfg.actor.clone())),
  };
  tracing::debug!(base_url = %api_config.base_url, "using server");

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Assets { status, category, holder, text } => {
      let filter = AssetFilter { status, category, assigned_to: holder, text };
      output::assets(&client.list_assets(&filter).await?);
    }
    Command::Employees { department, status, text } => {
      let filter = EmployeeFilter { department_id: department, status, text };
      output::employees(&client.list_employees(&filter).await?);
    }
    Command::Assign { employee, date, assets } => {
      let n = client.assign(&assets, employee, date).await?;
      println!("assigned {n} asset(s) to {employee}");
    }
    Command::Transfer { asset, employee, date } => {
      let asset = client.transfer(asset, employee, date).await?;
      println!("{} ({}) now held by {employee}", asset.name, asset.serial_number);
    }
    Command::Status { asset, status } => {
      let asset = client.set_status(asset, status).await?;
      println!("{} ({}) is now {}", asset.name, asset.serial_number, asset.status);
    }
    Command::Unassign { asset } => {
      let asset = client.unassign(asset).await?;
      println!("{} ({}) released", asset.name, asset.serial_number);
    }
    Command::History { asset } => output::history(&client.history(asset).await?),
    Command::Accessory { employee, key, held } => {
      let map = client.set_accessory(employee, &key, held).await?;
      output::accessories(&map);
    }
    Command::Term {
      term_type,
      employee,
      assets,
      accessories,
      delivery,
      return_date,
      out,
    } => {
      let request = TermRequest {
        term_type,
        employee_id: Some(employee),
        assets,
        accessories: (!accessories.is_empty()).then_some(accessories),
        delivery_date: delivery,
        return_date,
      };
      let document = client.term(&request).await?;
      match out {
        Some(path) => {
          std::fs::write(&path, &document.body)
            .with_context(|| format!("writing {}", path.display()))?;
          eprintln!("wrote {} ({} item(s))", path.display(), document.line_items.len());
        }
        None => print!("{}", document.body),
      }
    }
    Command::Dashboard => output::dashboard(&client.dashboard().await?),
    Command::Schedule { start, end, summary, description } => {
      let request = ScheduleRequest { summary, description, start: Some(start), end: Some(end) };
      let scheduled = client.schedule(&request).await?;
      if !scheduled.notified {
        eprintln!("warning: task tracker was not notified");
      }
      println!("{}", scheduled.calendar_url);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_term_command() {
    let args = Args::try_parse_from([
      "assetdesk",
      "term",
      "requisition",
      "--employee",
      "00000000-0000-0000-0000-000000000001",
      "--accessory",
      "mouse",
      "--accessory",
      "webcam",
      "--return-date",
      "2025-12-01",
    ])
    .unwrap();
    match args.command {
      Command::Term { term_type, accessories, return_date, .. } => {
        assert_eq!(term_type, TermType::Requisition);
        assert_eq!(accessories, ["mouse", "webcam"]);
        assert_eq!(return_date, NaiveDate::from_ymd_opt(2025, 12, 1));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn parses_legacy_category_and_boolish() {
    let args = Args::try_parse_from(["assetdesk", "assets", "--category", "kit_teclado_mouse"]).unwrap();
    assert!(matches!(
      args.command,
      Command::Assets { category: Some(AssetCategory::KeyboardMouseKit), .. }
    ));

    let args = Args::try_parse_from([
      "assetdesk",
      "accessory",
      "00000000-0000-0000-0000-000000000001",
      "fone",
      "off",
    ])
    .unwrap();
    assert!(matches!(args.command, Command::Accessory { held: false, .. }));
  }

  #[test]
  fn config_file_shape() {
    let cfg: ConfigFile = toml::from_str("url = \"http://desk:9000\"\nactor = \"maria\"").unwrap();
    assert_eq!(cfg.url, "http://desk:9000");
    assert_eq!(cfg.actor, "maria");
  }
}
