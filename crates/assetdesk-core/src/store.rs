//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `assetdesk-store-sqlite`). Every engine in this crate is generic over it;
//! none depends on a concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  asset::{Asset, AssetCategory, AssetPatch, AssetStatus, NewAsset},
  department::{Department, DepartmentPatch, NewDepartment},
  employee::{Employee, EmployeePatch, EmployeeStatus, NewEmployee},
};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::list_assets`]. Unset fields do not filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFilter {
  pub status:      Option<AssetStatus>,
  pub category:    Option<AssetCategory>,
  pub assigned_to: Option<Uuid>,
  /// Case-insensitive substring match over name and serial number.
  pub text:        Option<String>,
}

impl AssetFilter {
  pub fn assigned_to(employee_id: Uuid) -> Self {
    Self { assigned_to: Some(employee_id), ..Self::default() }
  }

  pub fn with_status(status: AssetStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  /// Whether `asset` passes this filter. Backends that cannot express a
  /// filter natively may apply it in memory with this method.
  pub fn matches(&self, asset: &Asset) -> bool {
    if self.status.is_some_and(|s| s != asset.status) {
      return false;
    }
    if self.category.is_some_and(|c| c != asset.category) {
      return false;
    }
    if self.assigned_to.is_some() && self.assigned_to != asset.assigned_to() {
      return false;
    }
    if let Some(text) = &self.text {
      let needle = text.to_lowercase();
      return asset.name.to_lowercase().contains(&needle)
        || asset.serial_number.to_lowercase().contains(&needle);
    }
    true
  }
}

/// Parameters for [`RecordStore::list_employees`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
  pub department_id: Option<Uuid>,
  pub status:        Option<EmployeeStatus>,
  /// Case-insensitive substring match over name and email.
  pub text:          Option<String>,
}

impl EmployeeFilter {
  pub fn matches(&self, employee: &Employee) -> bool {
    if self.department_id.is_some() && self.department_id != employee.department_id {
      return false;
    }
    if self.status.is_some_and(|s| s != employee.status) {
      return false;
    }
    if let Some(text) = &self.text {
      let needle = text.to_lowercase();
      return employee.name.to_lowercase().contains(&needle)
        || employee.email.to_lowercase().contains(&needle);
    }
    true
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a record store backend holding assets, employees and
/// departments.
///
/// Updates replace every field present in the patch with no field-level
/// merging and no locking: the last write wins. Reads and writes that return
/// `Option` yield `None` when the id does not resolve.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Assets ────────────────────────────────────────────────────────────

  /// Persist a new asset. The id and `created_at` are set by the store.
  fn insert_asset(
    &self,
    input: NewAsset,
  ) -> impl Future<Output = Result<Asset, Self::Error>> + Send + '_;

  fn get_asset(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Asset>, Self::Error>> + Send + '_;

  /// List assets matching `filter`, in creation order.
  fn list_assets<'a>(
    &'a self,
    filter: &'a AssetFilter,
  ) -> impl Future<Output = Result<Vec<Asset>, Self::Error>> + Send + 'a;

  fn update_asset(
    &self,
    id: Uuid,
    patch: AssetPatch,
  ) -> impl Future<Output = Result<Option<Asset>, Self::Error>> + Send + '_;

  /// Returns `false` if nothing was deleted.
  fn delete_asset(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Employees ─────────────────────────────────────────────────────────

  fn insert_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  fn get_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  fn list_employees<'a>(
    &'a self,
    filter: &'a EmployeeFilter,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + 'a;

  fn update_employee(
    &self,
    id: Uuid,
    patch: EmployeePatch,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  fn delete_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Departments ───────────────────────────────────────────────────────

  fn insert_department(
    &self,
    input: NewDepartment,
  ) -> impl Future<Output = Result<Department, Self::Error>> + Send + '_;

  fn get_department(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + '_;

  /// List all departments ordered by name.
  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>, Self::Error>> + Send + '_;

  fn update_department(
    &self,
    id: Uuid,
    patch: DepartmentPatch,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + '_;

  fn delete_department(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
