//! In-memory [`RecordStore`] used by this crate's unit tests.
//!
//! Writes can be made to fail after a set number of successes so that
//! store-failure paths (batch abort, accessory revert) are reachable. Reads
//! can be gated so that concurrent read-modify-write sequences interleave.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::{
  asset::{Asset, AssetCategory, AssetPatch, AssetStatus, Assignment, NewAsset},
  department::{Department, DepartmentPatch, NewDepartment},
  employee::{Employee, EmployeePatch, NewEmployee},
  store::{AssetFilter, EmployeeFilter, RecordStore},
};

#[derive(Debug, thiserror::Error)]
#[error("simulated write failure")]
pub struct WriteFailed;

#[derive(Default)]
struct Tables {
  assets:      Vec<Asset>,
  employees:   Vec<Employee>,
  departments: Vec<Department>,
  /// Remaining successful writes before every write fails.
  writes_left: Option<usize>,
}

#[derive(Default)]
pub struct MemoryStore {
  tables:    Mutex<Tables>,
  read_gate: Mutex<Option<Arc<Barrier>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Allow `n` more writes, then fail all subsequent ones.
  pub fn fail_writes_after(&self, n: usize) {
    self.tables.lock().unwrap().writes_left = Some(n);
  }

  pub fn heal(&self) { self.tables.lock().unwrap().writes_left = None; }

  /// Hold every `get_asset` and `get_employee` until `parties` of them are
  /// waiting, then release them together.
  pub fn gate_reads(&self, parties: usize) {
    *self.read_gate.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
  }

  pub fn ungate_reads(&self) { *self.read_gate.lock().unwrap() = None; }

  async fn pass_read_gate(&self) {
    let gate = self.read_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
      gate.wait().await;
    }
  }

  fn write_permit(tables: &mut Tables) -> Result<(), WriteFailed> {
    match tables.writes_left.as_mut() {
      None => Ok(()),
      Some(0) => Err(WriteFailed),
      Some(n) => {
        *n -= 1;
        Ok(())
      }
    }
  }

  // ── Seeding helpers ────────────────────────────────────────────────────

  pub async fn department(&self, name: &str) -> Department {
    self.insert_department(NewDepartment::new(name)).await.unwrap()
  }

  pub async fn employee(&self, name: &str, department_id: Uuid) -> Employee {
    let email = format!("{}@corp.example", name.to_lowercase());
    self
      .insert_employee(NewEmployee::new(name, email, "555-0100", department_id, "Analyst"))
      .await
      .unwrap()
  }

  pub async fn asset(&self, name: &str, category: AssetCategory, serial: &str) -> Asset {
    self.insert_asset(NewAsset::new(name, category, serial)).await.unwrap()
  }

  /// Put `asset_id` directly into the in-use state for `employee_id`.
  pub async fn hand_over(&self, asset_id: Uuid, employee_id: Uuid, date: NaiveDate) -> Asset {
    let patch = AssetPatch {
      status: Some(AssetStatus::InUse),
      assignment: Some(Some(Assignment { employee_id, date })),
      ..AssetPatch::default()
    };
    self.update_asset(asset_id, patch).await.unwrap().unwrap()
  }
}

impl RecordStore for MemoryStore {
  type Error = WriteFailed;

  async fn insert_asset(&self, input: NewAsset) -> Result<Asset, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let asset = input.into_asset(Uuid::new_v4(), Utc::now());
    t.assets.push(asset.clone());
    Ok(asset)
  }

  async fn get_asset(&self, id: Uuid) -> Result<Option<Asset>, WriteFailed> {
    let found = {
      let t = self.tables.lock().unwrap();
      t.assets.iter().find(|a| a.asset_id == id).cloned()
    };
    self.pass_read_gate().await;
    Ok(found)
  }

  async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, WriteFailed> {
    let t = self.tables.lock().unwrap();
    Ok(t.assets.iter().filter(|a| filter.matches(a)).cloned().collect())
  }

  async fn update_asset(&self, id: Uuid, patch: AssetPatch) -> Result<Option<Asset>, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    Ok(t.assets.iter_mut().find(|a| a.asset_id == id).map(|a| {
      patch.apply_to(a);
      a.clone()
    }))
  }

  async fn delete_asset(&self, id: Uuid) -> Result<bool, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let before = t.assets.len();
    t.assets.retain(|a| a.asset_id != id);
    Ok(t.assets.len() != before)
  }

  async fn insert_employee(&self, input: NewEmployee) -> Result<Employee, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let employee = input.into_employee(Uuid::new_v4(), Utc::now());
    t.employees.push(employee.clone());
    Ok(employee)
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, WriteFailed> {
    let found = {
      let t = self.tables.lock().unwrap();
      t.employees.iter().find(|e| e.employee_id == id).cloned()
    };
    self.pass_read_gate().await;
    Ok(found)
  }

  async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, WriteFailed> {
    let t = self.tables.lock().unwrap();
    Ok(t.employees.iter().filter(|e| filter.matches(e)).cloned().collect())
  }

  async fn update_employee(
    &self,
    id: Uuid,
    patch: EmployeePatch,
  ) -> Result<Option<Employee>, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    Ok(t.employees.iter_mut().find(|e| e.employee_id == id).map(|e| {
      patch.apply_to(e);
      e.clone()
    }))
  }

  async fn delete_employee(&self, id: Uuid) -> Result<bool, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let before = t.employees.len();
    t.employees.retain(|e| e.employee_id != id);
    Ok(t.employees.len() != before)
  }

  async fn insert_department(&self, input: NewDepartment) -> Result<Department, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let department = input.into_department(Uuid::new_v4(), Utc::now());
    t.departments.push(department.clone());
    Ok(department)
  }

  async fn get_department(&self, id: Uuid) -> Result<Option<Department>, WriteFailed> {
    let t = self.tables.lock().unwrap();
    Ok(t.departments.iter().find(|d| d.department_id == id).cloned())
  }

  async fn list_departments(&self) -> Result<Vec<Department>, WriteFailed> {
    let t = self.tables.lock().unwrap();
    let mut all = t.departments.clone();
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(all)
  }

  async fn update_department(
    &self,
    id: Uuid,
    patch: DepartmentPatch,
  ) -> Result<Option<Department>, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    Ok(t.departments.iter_mut().find(|d| d.department_id == id).map(|d| {
      patch.apply_to(d);
      d.clone()
    }))
  }

  async fn delete_department(&self, id: Uuid) -> Result<bool, WriteFailed> {
    let mut t = self.tables.lock().unwrap();
    Self::write_permit(&mut t)?;
    let before = t.departments.len();
    t.departments.retain(|d| d.department_id != id);
    Ok(t.departments.len() != before)
  }
}
