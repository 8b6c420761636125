//! Asset lifecycle operations: assignment, transfer, status and release.
//!
//! Every operation here keeps the assignment invariant (employee and date are
//! set or cleared together) by writing [`Assignment`] as a single value.
//! Status is loose: `assign` sets it to in-use, while `transfer`
//! and `unassign` leave it alone, and `set_status` accepts any transition.
//!
//! `transfer` is the only operation that appends history. It does so by
//! reading the asset, appending locally and writing the whole sequence back,
//! so two concurrent transfers of one asset can lose an entry.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
  Error, Result, ValidationError,
  actor::Actor,
  asset::{Asset, AssetPatch, AssetStatus, Assignment, HistoryEntry},
  store::RecordStore,
};

/// Text of the history entry appended by [`transfer`].
pub fn transfer_action(employee_id: Uuid) -> String {
  format!("Transferred to employee {employee_id}")
}

async fn require_employee<S: RecordStore>(store: &S, employee_id: Uuid) -> Result<()> {
  match store.get_employee(employee_id).await.map_err(Error::store)? {
    Some(_) => Ok(()),
    None => Err(ValidationError::UnknownEmployee(employee_id).into()),
  }
}

async fn require_asset<S: RecordStore>(store: &S, asset_id: Uuid) -> Result<Asset> {
  store
    .get_asset(asset_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| ValidationError::UnknownAsset(asset_id).into())
}

/// Hand every asset in `asset_ids` to `employee_id` effective `date`, marking
/// each in use. Returns the number of assets updated.
///
/// Callers are expected to offer only available assets; status is not
/// re-checked here. Duplicate ids are written once. The batch is validated
/// before any write; writes then run in order and the first failure aborts
/// the batch with a single [`Error::Store`], leaving earlier writes applied.
/// No history is recorded.
pub async fn assign<S: RecordStore>(
  store: &S,
  asset_ids: &[Uuid],
  employee_id: Uuid,
  date: NaiveDate,
) -> Result<usize> {
  let mut ids: Vec<Uuid> = Vec::with_capacity(asset_ids.len());
  for id in asset_ids {
    if !ids.contains(id) {
      ids.push(*id);
    }
  }
  if ids.is_empty() {
    return Err(ValidationError::EmptyAssetBatch.into());
  }

  require_employee(store, employee_id).await?;
  for id in &ids {
    require_asset(store, *id).await?;
  }

  let assignment = Assignment { employee_id, date };
  for (done, id) in ids.iter().enumerate() {
    let patch = AssetPatch {
      status: Some(AssetStatus::InUse),
      assignment: Some(Some(assignment)),
      ..AssetPatch::default()
    };
    match store.update_asset(*id, patch).await {
      Ok(Some(_)) => {}
      Ok(None) => return Err(ValidationError::UnknownAsset(*id).into()),
      Err(e) => {
        warn!(%employee_id, written = done, total = ids.len(), "asset batch assignment failed");
        return Err(Error::store(e));
      }
    }
  }

  info!(%employee_id, count = ids.len(), "assigned assets");
  Ok(ids.len())
}

/// Move a single asset to `employee_id` effective `date` and append one
/// history entry attributed to `actor`. Status is left unchanged.
pub async fn transfer<S: RecordStore>(
  store: &S,
  actor: &Actor,
  asset_id: Uuid,
  employee_id: Uuid,
  date: NaiveDate,
) -> Result<Asset> {
  let asset = require_asset(store, asset_id).await?;
  require_employee(store, employee_id).await?;

  let mut history = asset.history;
  history.push(HistoryEntry {
    action:    transfer_action(employee_id),
    actor:     actor.to_string(),
    timestamp: Utc::now(),
  });

  let patch = AssetPatch {
    assignment: Some(Some(Assignment { employee_id, date })),
    history: Some(history),
    ..AssetPatch::default()
  };
  let updated = store
    .update_asset(asset_id, patch)
    .await
    .map_err(Error::store)?
    .ok_or(ValidationError::UnknownAsset(asset_id))?;

  info!(%asset_id, %employee_id, %actor, "transferred asset");
  Ok(updated)
}

/// Set the status of an asset. Any status is reachable from any other and the
/// assignment is not touched.
pub async fn set_status<S: RecordStore>(
  store: &S,
  asset_id: Uuid,
  status: AssetStatus,
) -> Result<Asset> {
  let patch = AssetPatch { status: Some(status), ..AssetPatch::default() };
  store
    .update_asset(asset_id, patch)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| ValidationError::UnknownAsset(asset_id).into())
}

/// Clear the assignment of an asset. Status is left unchanged.
pub async fn unassign<S: RecordStore>(store: &S, asset_id: Uuid) -> Result<Asset> {
  let patch = AssetPatch { assignment: Some(None), ..AssetPatch::default() };
  store
    .update_asset(asset_id, patch)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| ValidationError::UnknownAsset(asset_id).into())
}

// ─── Usage report ────────────────────────────────────────────────────────────

/// The employee currently holding an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
  pub employee_id: Uuid,
  /// `None` when the employee record no longer resolves.
  pub name:        Option<String>,
  pub since:       NaiveDate,
}

/// An asset's current holder and its full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
  pub asset_id:      Uuid,
  pub name:          String,
  pub serial_number: String,
  pub status:        AssetStatus,
  pub holder:        Option<Holder>,
  pub entries:       Vec<HistoryEntry>,
}

pub async fn usage_report<S: RecordStore>(store: &S, asset_id: Uuid) -> Result<UsageReport> {
  let asset = store
    .get_asset(asset_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::AssetNotFound(asset_id))?;

  let holder = match asset.assignment {
    Some(a) => {
      let employee = store.get_employee(a.employee_id).await.map_err(Error::store)?;
      Some(Holder { employee_id: a.employee_id, name: employee.map(|e| e.name), since: a.date })
    }
    None => None,
  };

  Ok(UsageReport {
    asset_id,
    name: asset.name,
    serial_number: asset.serial_number,
    status: asset.status,
    holder,
    entries: asset.history,
  })
}
