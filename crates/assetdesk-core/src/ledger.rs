//! Per-employee accessory flags.
//!
//! Flags are persisted one at a time and immediately, separately from any
//! other employee edit. The write is read-merge-replace over the whole map,
//! so concurrent toggles on one employee can overwrite each other.

use tracing::warn;
use uuid::Uuid;

use crate::{
  Error, Result, ValidationError,
  employee::{AccessoryMap, EmployeePatch},
  store::RecordStore,
};

/// Set `key` to `held` on `employee_id`'s accessory map and persist it.
/// Returns the map as written.
pub async fn set_accessory<S: RecordStore>(
  store: &S,
  employee_id: Uuid,
  key: &str,
  held: bool,
) -> Result<AccessoryMap> {
  if key.trim().is_empty() {
    return Err(ValidationError::EmptyAccessoryKey.into());
  }

  let employee = store
    .get_employee(employee_id)
    .await
    .map_err(Error::store)?
    .ok_or(ValidationError::UnknownEmployee(employee_id))?;

  let mut accessories = employee.accessories;
  accessories.insert(key.to_owned(), held);

  let patch = EmployeePatch {
    accessories: Some(accessories),
    ..EmployeePatch::default()
  };
  let updated = store
    .update_employee(employee_id, patch)
    .await
    .map_err(Error::store)?
    .ok_or(ValidationError::UnknownEmployee(employee_id))?;
  Ok(updated.accessories)
}

/// The observable accessory state of one employee, as shown to a user.
///
/// [`AccessoryLedger::set`] applies a change optimistically. If persisting it
/// fails, the visible state reverts to the last map known to be stored and
/// the error is returned.
#[derive(Debug, Clone)]
pub struct AccessoryLedger {
  employee_id: Uuid,
  visible:     AccessoryMap,
  saved:       AccessoryMap,
}

impl AccessoryLedger {
  pub async fn load<S: RecordStore>(store: &S, employee_id: Uuid) -> Result<Self> {
    let employee = store
      .get_employee(employee_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::EmployeeNotFound(employee_id))?;
    Ok(Self {
      employee_id,
      visible: employee.accessories.clone(),
      saved: employee.accessories,
    })
  }

  pub fn employee_id(&self) -> Uuid { self.employee_id }

  pub fn accessories(&self) -> &AccessoryMap { &self.visible }

  /// Whether `key` is shown as held. Absent keys are not held.
  pub fn is_held(&self, key: &str) -> bool {
    self.visible.get(key).copied().unwrap_or(false)
  }

  pub async fn set<S: RecordStore>(&mut self, store: &S, key: &str, held: bool) -> Result<()> {
    self.visible.insert(key.to_owned(), held);
    match set_accessory(store, self.employee_id, key, held).await {
      Ok(written) => {
        self.saved = written.clone();
        self.visible = written;
        Ok(())
      }
      Err(e) => {
        warn!(employee_id = %self.employee_id, key, error = %e, "accessory update failed; reverting");
        self.visible = self.saved.clone();
        Err(e)
      }
    }
  }
}
