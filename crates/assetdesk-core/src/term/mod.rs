//! Term documents: hand-over, requisition and return declarations.
//!
//! A term is never stored. It is assembled on demand from the current
//! employee, department, asset and accessory state, and regenerating it with
//! the same inputs yields the same document.
//!
//! Which assets a term lists depends on its type:
//!
//! | Type | Asset source | User selection |
//! |------|--------------|----------------|
//! | Responsibility | assets assigned to the employee | may add available assets |
//! | Requisition | none | free pick from available assets |
//! | Return | assets assigned to the employee | read-only |
//!
//! Accessories start from the employee's held flags for every type and may be
//! toggled freely; the selection affects only the document, never the ledger.

mod draft;
mod template;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  Error, Result, ValidationError,
  accessory,
  asset::{Asset, AssetCategory},
  employee::Employee,
  store::RecordStore,
};

pub use draft::TermDraft;

// ─── Term type ───────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TermType {
  Responsibility,
  Requisition,
  Return,
}

/// Where a term's asset lines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
  /// The employee's assigned assets, plus any available assets picked.
  AssignedAndPicked,
  /// Only available assets picked by the user.
  PickedOnly,
  /// The employee's assigned assets; nothing can be added or removed.
  AssignedOnly,
}

impl TermType {
  pub fn asset_source(self) -> AssetSource {
    match self {
      Self::Responsibility => AssetSource::AssignedAndPicked,
      Self::Requisition => AssetSource::PickedOnly,
      Self::Return => AssetSource::AssignedOnly,
    }
  }

  /// Whether the document body carries a separate return date.
  pub fn shows_return_date(self) -> bool { matches!(self, Self::Requisition) }
}

// ─── Snapshots and lines ─────────────────────────────────────────────────────

/// The employee fields printed on a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
  pub employee_id: Uuid,
  pub name:        String,
  pub cpf:         Option<String>,
  pub email:       String,
  pub position:    String,
}

impl From<&Employee> for EmployeeSnapshot {
  fn from(e: &Employee) -> Self {
    Self {
      employee_id: e.employee_id,
      name:        e.name.clone(),
      cpf:         e.cpf.clone(),
      email:       e.email.clone(),
      position:    e.position.clone(),
    }
  }
}

/// One asset listed on a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLine {
  pub asset_id:      Uuid,
  pub name:          String,
  pub category:      AssetCategory,
  pub serial_number: String,
}

impl From<&Asset> for AssetLine {
  fn from(a: &Asset) -> Self {
    Self {
      asset_id:      a.asset_id,
      name:          a.name.clone(),
      category:      a.category,
      serial_number: a.serial_number.clone(),
    }
  }
}

impl AssetLine {
  pub fn render(&self) -> String {
    format!("• {} - {} - Serial: {}", self.name, self.category, self.serial_number)
  }
}

pub fn accessory_line(key: &str) -> String { format!("• {}", accessory::display_name(key)) }

// ─── Document ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDocument {
  pub term_type:       TermType,
  pub employee:        EmployeeSnapshot,
  pub department_name: String,
  pub assets:          Vec<AssetLine>,
  /// Accessory keys in document order.
  pub accessories:     Vec<String>,
  pub delivery_date:   NaiveDate,
  pub return_date:     Option<NaiveDate>,
  pub issued_on:       NaiveDate,
  /// Asset lines first, then accessory lines.
  pub line_items:      Vec<String>,
  pub body:            String,
}

// ─── Stateless generation ────────────────────────────────────────────────────

/// A complete term selection submitted in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRequest {
  pub term_type:     TermType,
  pub employee_id:   Option<Uuid>,
  /// Extra assets picked from the available pool, in pick order. Ignored for
  /// return terms.
  #[serde(default)]
  pub assets:        Vec<Uuid>,
  /// Accessory selection; `None` uses the employee's held accessories.
  #[serde(default)]
  pub accessories:   Option<Vec<String>>,
  /// Defaults to the issue date.
  #[serde(default)]
  pub delivery_date: Option<NaiveDate>,
  #[serde(default)]
  pub return_date:   Option<NaiveDate>,
}

/// Assemble the document for `request` from current store state, issued on
/// `today`.
pub async fn generate<S: RecordStore>(
  store: &S,
  request: TermRequest,
  today: NaiveDate,
) -> Result<TermDocument> {
  let employee_id = request.employee_id.ok_or(ValidationError::EmployeeRequired)?;

  let mut draft = TermDraft::new(request.term_type, request.delivery_date.unwrap_or(today));
  draft.select_employee(store, Some(employee_id)).await?;

  if request.term_type.asset_source() != AssetSource::AssignedOnly {
    for asset_id in request.assets {
      if draft.is_asset_selected(asset_id) {
        continue;
      }
      let asset = store
        .get_asset(asset_id)
        .await
        .map_err(Error::store)?
        .ok_or(ValidationError::UnknownAsset(asset_id))?;
      draft.toggle_asset(&asset)?;
    }
  }

  if let Some(keys) = request.accessories {
    draft.set_accessories(keys);
  }
  draft.set_return_date(request.return_date);
  draft.render(today)
}
