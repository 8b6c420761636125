//! Quick scheduling of an equipment maintenance event.
//!
//! The event is handed to a [`TaskNotifier`] (best effort) and returned as a
//! calendar link the user opens to add it to their own calendar.

use std::{convert::Infallible, future::Future};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Result, ValidationError};

pub const DEFAULT_SUMMARY: &str = "Manutenção de Equipamento";
pub const DEFAULT_DESCRIPTION: &str = "Agendamento de manutenção preventiva.";

const CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
  #[serde(default)]
  pub summary:     String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub start:       Option<DateTime<Utc>>,
  #[serde(default)]
  pub end:         Option<DateTime<Utc>>,
}

/// A request with its window resolved and blank text defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
  pub summary:     String,
  pub description: String,
  pub start:       DateTime<Utc>,
  pub end:         DateTime<Utc>,
}

impl ScheduledEvent {
  pub fn calendar_url(&self) -> String {
    format!(
      "{CALENDAR_URL}?action=TEMPLATE&text={}&details={}&dates={}/{}",
      urlencoding::encode(&self.summary),
      urlencoding::encode(&self.description),
      calendar_stamp(self.start),
      calendar_stamp(self.end),
    )
  }
}

fn calendar_stamp(at: DateTime<Utc>) -> String { at.format("%Y%m%dT%H%M%SZ").to_string() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
  pub event:        ScheduledEvent,
  pub calendar_url: String,
  /// Whether the task notification went through.
  pub notified:     bool,
}

/// External task tracker told about scheduled events.
pub trait TaskNotifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn notify(&self, event: &ScheduledEvent) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Notifier for deployments without a task tracker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl TaskNotifier for NoopNotifier {
  type Error = Infallible;

  async fn notify(&self, _event: &ScheduledEvent) -> Result<(), Infallible> { Ok(()) }
}

pub async fn quick_schedule<N: TaskNotifier>(
  notifier: &N,
  request: ScheduleRequest,
) -> Result<Scheduled> {
  let (Some(start), Some(end)) = (request.start, request.end) else {
    return Err(ValidationError::MissingScheduleWindow.into());
  };

  let or_default = |text: String, default: &str| {
    if text.trim().is_empty() { default.to_owned() } else { text }
  };
  let event = ScheduledEvent {
    summary: or_default(request.summary, DEFAULT_SUMMARY),
    description: or_default(request.description, DEFAULT_DESCRIPTION),
    start,
    end,
  };

  let notified = match notifier.notify(&event).await {
    Ok(()) => {
      info!(summary = %event.summary, %start, "scheduled task created");
      true
    }
    Err(e) => {
      warn!(error = %e, "task notification failed; continuing");
      false
    }
  };

  let calendar_url = event.calendar_url();
  Ok(Scheduled { event, calendar_url, notified })
}
