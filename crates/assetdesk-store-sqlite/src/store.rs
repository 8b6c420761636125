//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use assetdesk_core::{
  asset::{Asset, AssetPatch, NewAsset},
  department::{Department, DepartmentPatch, NewDepartment},
  employee::{Employee, EmployeePatch, NewEmployee},
  store::{AssetFilter, EmployeeFilter, RecordStore},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    ASSET_COLUMNS, EMPLOYEE_COLUMNS, RawAsset, RawDepartment, RawEmployee, encode_dt, encode_uuid,
  },
  error::Error,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by the tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_asset(&self, raw: RawAsset, insert: bool) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let params = rusqlite::params![
          raw.asset_id,
          raw.name,
          raw.category,
          raw.brand,
          raw.model,
          raw.serial_number,
          raw.status,
          raw.assigned_to,
          raw.assigned_date,
          raw.specifications,
          raw.purchase_date,
          raw.purchase_value,
          raw.supplier,
          raw.warranty_months,
          raw.location,
          raw.description,
          raw.history,
          raw.created_at,
        ];
        // The serial number and creation time never change after insert.
        let sql = if insert {
          format!(
            "INSERT INTO assets ({ASSET_COLUMNS}) VALUES
               (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
          )
        } else {
          "UPDATE assets SET
             name = ?2, category = ?3, brand = ?4, model = ?5, status = ?7,
             assigned_to = ?8, assigned_date = ?9, specifications = ?10,
             purchase_date = ?11, purchase_value = ?12, supplier = ?13,
             warranty_months = ?14, location = ?15, description = ?16, history = ?17
           WHERE asset_id = ?1 AND serial_number = ?6 AND created_at = ?18"
            .to_owned()
        };
        Ok(conn.execute(&sql, params)?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn write_employee(&self, raw: RawEmployee, insert: bool) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let params = rusqlite::params![
          raw.employee_id,
          raw.name,
          raw.email,
          raw.phone,
          raw.cpf,
          raw.department_id,
          raw.position,
          raw.hire_date,
          raw.status,
          raw.accessories,
          raw.notes,
          raw.created_at,
        ];
        let sql = if insert {
          format!(
            "INSERT INTO employees ({EMPLOYEE_COLUMNS}) VALUES
               (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
          )
        } else {
          "UPDATE employees SET
             name = ?2, email = ?3, phone = ?4, cpf = ?5, department_id = ?6,
             position = ?7, hire_date = ?8, status = ?9, accessories = ?10, notes = ?11
           WHERE employee_id = ?1 AND created_at = ?12"
            .to_owned()
        };
        Ok(conn.execute(&sql, params)?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn write_department(&self, d: &Department, insert: bool) -> Result<bool> {
    let id_str = encode_uuid(d.department_id);
    let name = d.name.clone();
    let description = d.description.clone();
    let at_str = encode_dt(d.created_at);

    let changed = self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO departments (department_id, name, description, created_at)
           VALUES (?1, ?2, ?3, ?4)"
        } else {
          "UPDATE departments SET name = ?2, description = ?3
           WHERE department_id = ?1 AND created_at = ?4"
        };
        Ok(conn.execute(sql, rusqlite::params![id_str, name, description, at_str])?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn delete_row(&self, table: &'static str, key: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {table} WHERE {key} = ?1"),
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}

#[cfg(test)]
impl SqliteStore {
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Assets ────────────────────────────────────────────────────────────────

  async fn insert_asset(&self, input: NewAsset) -> Result<Asset> {
    let asset = input.into_asset(Uuid::new_v4(), Utc::now());
    self.write_asset(RawAsset::from_asset(&asset)?, true).await?;
    Ok(asset)
  }

  async fn get_asset(&self, id: Uuid) -> Result<Option<Asset>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAsset> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ASSET_COLUMNS} FROM assets WHERE asset_id = ?1"),
            rusqlite::params![id_str],
            RawAsset::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAsset::into_asset).transpose()
  }

  async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
    let status = filter.status.map(|s| s.to_string());
    let category = filter.category.map(|c| c.to_string());
    let assigned_to = filter.assigned_to.map(encode_uuid);

    let raws: Vec<RawAsset> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ASSET_COLUMNS} FROM assets
           WHERE (?1 IS NULL OR status = ?1)
             AND (?2 IS NULL OR category = ?2)
             AND (?3 IS NULL OR assigned_to = ?3)
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status, category, assigned_to], RawAsset::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Text search is matched in Rust for Unicode-aware case folding.
    let mut assets = Vec::with_capacity(raws.len());
    for raw in raws {
      let asset = raw.into_asset()?;
      if filter.matches(&asset) {
        assets.push(asset);
      }
    }
    Ok(assets)
  }

  async fn update_asset(&self, id: Uuid, patch: AssetPatch) -> Result<Option<Asset>> {
    let Some(mut asset) = self.get_asset(id).await? else {
      return Ok(None);
    };
    patch.apply_to(&mut asset);
    let written = self.write_asset(RawAsset::from_asset(&asset)?, false).await?;
    Ok(written.then_some(asset))
  }

  async fn delete_asset(&self, id: Uuid) -> Result<bool> {
    self.delete_row("assets", "asset_id", id).await
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn insert_employee(&self, input: NewEmployee) -> Result<Employee> {
    let employee = input.into_employee(Uuid::new_v4(), Utc::now());
    self.write_employee(RawEmployee::from_employee(&employee)?, true).await?;
    Ok(employee)
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?1"),
            rusqlite::params![id_str],
            RawEmployee::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
    let department_id = filter.department_id.map(encode_uuid);
    let status = filter.status.map(|s| s.to_string());

    let raws: Vec<RawEmployee> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EMPLOYEE_COLUMNS} FROM employees
           WHERE (?1 IS NULL OR department_id = ?1)
             AND (?2 IS NULL OR status = ?2)
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![department_id, status], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut employees = Vec::with_capacity(raws.len());
    for raw in raws {
      let employee = raw.into_employee()?;
      if filter.matches(&employee) {
        employees.push(employee);
      }
    }
    Ok(employees)
  }

  async fn update_employee(&self, id: Uuid, patch: EmployeePatch) -> Result<Option<Employee>> {
    let Some(mut employee) = self.get_employee(id).await? else {
      return Ok(None);
    };
    patch.apply_to(&mut employee);
    let written = self.write_employee(RawEmployee::from_employee(&employee)?, false).await?;
    Ok(written.then_some(employee))
  }

  async fn delete_employee(&self, id: Uuid) -> Result<bool> {
    self.delete_row("employees", "employee_id", id).await
  }

  // ── Departments ───────────────────────────────────────────────────────────

  async fn insert_department(&self, input: NewDepartment) -> Result<Department> {
    let department = input.into_department(Uuid::new_v4(), Utc::now());
    self.write_department(&department, true).await?;
    Ok(department)
  }

  async fn get_department(&self, id: Uuid) -> Result<Option<Department>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawDepartment> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT department_id, name, description, created_at
             FROM departments WHERE department_id = ?1",
            rusqlite::params![id_str],
            RawDepartment::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDepartment::into_department).transpose()
  }

  async fn list_departments(&self) -> Result<Vec<Department>> {
    let raws: Vec<RawDepartment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT department_id, name, description, created_at
           FROM departments ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], RawDepartment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDepartment::into_department).collect()
  }

  async fn update_department(
    &self,
    id: Uuid,
    patch: DepartmentPatch,
  ) -> Result<Option<Department>> {
    let Some(mut department) = self.get_department(id).await? else {
      return Ok(None);
    };
    patch.apply_to(&mut department);
    let written = self.write_department(&department, false).await?;
    Ok(written.then_some(department))
  }

  async fn delete_department(&self, id: Uuid) -> Result<bool> {
    self.delete_row("departments", "department_id", id).await
  }
}
