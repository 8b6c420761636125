//! Asset: a tracked piece of IT equipment.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::ValidationError;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// The closed set of equipment categories.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetCategory {
  Notebook,
  Desktop,
  Monitor,
  Mobile,
  /// Stored as `teclado_mouse_kit`; two legacy spellings are still accepted.
  #[serde(
    rename = "teclado_mouse_kit",
    alias = "kit_teclado_mouse",
    alias = "kit teclado | mouse"
  )]
  #[strum(
    to_string = "teclado_mouse_kit",
    serialize = "kit_teclado_mouse",
    serialize = "kit teclado | mouse"
  )]
  KeyboardMouseKit,
}

/// Lifecycle status of an asset.
///
/// Any status may be set from any other; status is not derived from the
/// assignment.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetStatus {
  #[default]
  Available,
  InUse,
  Maintenance,
  Inactive,
}

// ─── Sub-types ───────────────────────────────────────────────────────────────

/// The employee currently holding an asset and the date the hand-over took
/// effect. Employee and date are set and cleared together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  /// Weak reference; the employee record is looked up, never owned.
  pub employee_id: Uuid,
  pub date:        NaiveDate,
}

/// One line of an asset's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub action:    String,
  pub actor:     String,
  pub timestamp: DateTime<Utc>,
}

/// Purchase metadata. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
  pub date:            Option<NaiveDate>,
  pub value:           Option<Decimal>,
  pub supplier:        Option<String>,
  pub warranty_months: Option<u32>,
}

// ─── Asset ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  pub asset_id:       Uuid,
  pub name:           String,
  pub category:       AssetCategory,
  pub brand:          Option<String>,
  pub model:          Option<String>,
  /// Unique across all assets; fixed at creation.
  pub serial_number:  String,
  pub status:         AssetStatus,
  pub assignment:     Option<Assignment>,
  pub specifications: BTreeMap<String, String>,
  pub purchase:       Purchase,
  pub location:       Option<String>,
  pub description:    Option<String>,
  pub history:        Vec<HistoryEntry>,
  pub created_at:     DateTime<Utc>,
}

impl Asset {
  pub fn assigned_to(&self) -> Option<Uuid> {
    self.assignment.map(|a| a.employee_id)
  }

  pub fn is_available(&self) -> bool { self.status == AssetStatus::Available }
}

// ─── NewAsset ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::RecordStore::insert_asset`]. New assets are never
/// assigned and carry no history; `created_at` is set by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
  pub name:           String,
  pub category:       AssetCategory,
  #[serde(default)]
  pub brand:          Option<String>,
  #[serde(default)]
  pub model:          Option<String>,
  pub serial_number:  String,
  #[serde(default)]
  pub status:         AssetStatus,
  #[serde(default)]
  pub specifications: BTreeMap<String, String>,
  #[serde(default)]
  pub purchase:       Purchase,
  #[serde(default)]
  pub location:       Option<String>,
  #[serde(default)]
  pub description:    Option<String>,
}

impl NewAsset {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(
    name: impl Into<String>,
    category: AssetCategory,
    serial_number: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      category,
      brand: None,
      model: None,
      serial_number: serial_number.into(),
      status: AssetStatus::default(),
      specifications: BTreeMap::new(),
      purchase: Purchase::default(),
      location: None,
      description: None,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::MissingField("name"));
    }
    if self.serial_number.trim().is_empty() {
      return Err(ValidationError::MissingField("serial_number"));
    }
    Ok(())
  }

  /// The stored record for this input: unassigned, with empty history.
  pub fn into_asset(self, asset_id: Uuid, created_at: DateTime<Utc>) -> Asset {
    Asset {
      asset_id,
      name: self.name,
      category: self.category,
      brand: self.brand,
      model: self.model,
      serial_number: self.serial_number,
      status: self.status,
      assignment: None,
      specifications: self.specifications,
      purchase: self.purchase,
      location: self.location,
      description: self.description,
      history: Vec::new(),
      created_at,
    }
  }
}

// ─── AssetPatch ──────────────────────────────────────────────────────────────

/// A partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears it. The serial number cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPatch {
  pub name:           Option<String>,
  pub category:       Option<AssetCategory>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub brand:          Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub model:          Option<Option<String>>,
  pub status:         Option<AssetStatus>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub assignment:     Option<Option<Assignment>>,
  pub specifications: Option<BTreeMap<String, String>>,
  pub purchase:       Option<Purchase>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub location:       Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub description:    Option<Option<String>>,
  /// Replaces the whole sequence.
  pub history:        Option<Vec<HistoryEntry>>,
}

impl AssetPatch {
  /// Apply every present field to `asset`, replacing whole values.
  pub fn apply_to(self, asset: &mut Asset) {
    if let Some(v) = self.name {
      asset.name = v;
    }
    if let Some(v) = self.category {
      asset.category = v;
    }
    if let Some(v) = self.brand {
      asset.brand = v;
    }
    if let Some(v) = self.model {
      asset.model = v;
    }
    if let Some(v) = self.status {
      asset.status = v;
    }
    if let Some(v) = self.assignment {
      asset.assignment = v;
    }
    if let Some(v) = self.specifications {
      asset.specifications = v;
    }
    if let Some(v) = self.purchase {
      asset.purchase = v;
    }
    if let Some(v) = self.location {
      asset.location = v;
    }
    if let Some(v) = self.description {
      asset.description = v;
    }
    if let Some(v) = self.history {
      asset.history = v;
    }
  }
}
