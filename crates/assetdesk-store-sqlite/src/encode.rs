//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings and calendar dates are `YYYY-MM-DD`.
//! Enumerations are stored by their snake_case name. Maps and history are
//! compact JSON. UUIDs are hyphenated lowercase strings.

use std::str::FromStr;

use assetdesk_core::{
  asset::{Asset, Assignment, HistoryEntry, Purchase},
  department::Department,
  employee::Employee,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

/// Parse a strum-backed enumeration column.
pub fn decode_enum<T: FromStr>(column: &'static str, s: String) -> Result<T> {
  s.parse().map_err(|_| Error::UnknownVariant { column, value: s })
}

fn decode_opt<T>(s: Option<String>, f: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
  s.as_deref().map(f).transpose()
}

// ─── Assets ──────────────────────────────────────────────────────────────────

pub const ASSET_COLUMNS: &str = "asset_id, name, category, brand, model, serial_number, status, \
                                 assigned_to, assigned_date, specifications, purchase_date, \
                                 purchase_value, supplier, warranty_months, location, \
                                 description, history, created_at";

/// An `assets` row as read from SQLite, before decoding.
pub struct RawAsset {
  pub asset_id:        String,
  pub name:            String,
  pub category:        String,
  pub brand:           Option<String>,
  pub model:           Option<String>,
  pub serial_number:   String,
  pub status:          String,
  pub assigned_to:     Option<String>,
  pub assigned_date:   Option<String>,
  pub specifications:  String,
  pub purchase_date:   Option<String>,
  pub purchase_value:  Option<String>,
  pub supplier:        Option<String>,
  pub warranty_months: Option<u32>,
  pub location:        Option<String>,
  pub description:     Option<String>,
  pub history:         String,
  pub created_at:      String,
}

impl RawAsset {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      asset_id:        row.get(0)?,
      name:            row.get(1)?,
      category:        row.get(2)?,
      brand:           row.get(3)?,
      model:           row.get(4)?,
      serial_number:   row.get(5)?,
      status:          row.get(6)?,
      assigned_to:     row.get(7)?,
      assigned_date:   row.get(8)?,
      specifications:  row.get(9)?,
      purchase_date:   row.get(10)?,
      purchase_value:  row.get(11)?,
      supplier:        row.get(12)?,
      warranty_months: row.get(13)?,
      location:        row.get(14)?,
      description:     row.get(15)?,
      history:         row.get(16)?,
      created_at:      row.get(17)?,
    })
  }

  pub fn from_asset(a: &Asset) -> Result<Self> {
    Ok(Self {
      asset_id:        encode_uuid(a.asset_id),
      name:            a.name.clone(),
      category:        a.category.to_string(),
      brand:           a.brand.clone(),
      model:           a.model.clone(),
      serial_number:   a.serial_number.clone(),
      status:          a.status.to_string(),
      assigned_to:     a.assignment.map(|x| encode_uuid(x.employee_id)),
      assigned_date:   a.assignment.map(|x| encode_date(x.date)),
      specifications:  serde_json::to_string(&a.specifications)?,
      purchase_date:   a.purchase.date.map(encode_date),
      purchase_value:  a.purchase.value.map(|v| v.to_string()),
      supplier:        a.purchase.supplier.clone(),
      warranty_months: a.purchase.warranty_months,
      location:        a.location.clone(),
      description:     a.description.clone(),
      history:         serde_json::to_string(&a.history)?,
      created_at:      encode_dt(a.created_at),
    })
  }

  pub fn into_asset(self) -> Result<Asset> {
    let assignment = match (self.assigned_to, self.assigned_date) {
      (Some(employee), Some(date)) => Some(Assignment {
        employee_id: decode_uuid(&employee)?,
        date:        decode_date(&date)?,
      }),
      _ => None,
    };
    let history: Vec<HistoryEntry> = serde_json::from_str(&self.history)?;

    Ok(Asset {
      asset_id: decode_uuid(&self.asset_id)?,
      name: self.name,
      category: decode_enum("category", self.category)?,
      brand: self.brand,
      model: self.model,
      serial_number: self.serial_number,
      status: decode_enum("status", self.status)?,
      assignment,
      specifications: serde_json::from_str(&self.specifications)?,
      purchase: Purchase {
        date:            decode_opt(self.purchase_date, decode_date)?,
        value:           decode_opt(self.purchase_value, |s| Ok(Decimal::from_str(s)?))?,
        supplier:        self.supplier,
        warranty_months: self.warranty_months,
      },
      location: self.location,
      description: self.description,
      history,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

// ─── Employees ───────────────────────────────────────────────────────────────

pub const EMPLOYEE_COLUMNS: &str = "employee_id, name, email, phone, cpf, department_id, \
                                    position, hire_date, status, accessories, notes, created_at";

pub struct RawEmployee {
  pub employee_id:   String,
  pub name:          String,
  pub email:         String,
  pub phone:         String,
  pub cpf:           Option<String>,
  pub department_id: Option<String>,
  pub position:      String,
  pub hire_date:     Option<String>,
  pub status:        String,
  pub accessories:   String,
  pub notes:         Option<String>,
  pub created_at:    String,
}

impl RawEmployee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:   row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      phone:         row.get(3)?,
      cpf:           row.get(4)?,
      department_id: row.get(5)?,
      position:      row.get(6)?,
      hire_date:     row.get(7)?,
      status:        row.get(8)?,
      accessories:   row.get(9)?,
      notes:         row.get(10)?,
      created_at:    row.get(11)?,
    })
  }

  pub fn from_employee(e: &Employee) -> Result<Self> {
    Ok(Self {
      employee_id:   encode_uuid(e.employee_id),
      name:          e.name.clone(),
      email:         e.email.clone(),
      phone:         e.phone.clone(),
      cpf:           e.cpf.clone(),
      department_id: e.department_id.map(encode_uuid),
      position:      e.position.clone(),
      hire_date:     e.hire_date.map(encode_date),
      status:        e.status.to_string(),
      accessories:   serde_json::to_string(&e.accessories)?,
      notes:         e.notes.clone(),
      created_at:    encode_dt(e.created_at),
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id:   decode_uuid(&self.employee_id)?,
      name:          self.name,
      email:         self.email,
      phone:         self.phone,
      cpf:           self.cpf,
      department_id: decode_opt(self.department_id, decode_uuid)?,
      position:      self.position,
      hire_date:     decode_opt(self.hire_date, decode_date)?,
      status:        decode_enum("employee status", self.status)?,
      accessories:   serde_json::from_str(&self.accessories)?,
      notes:         self.notes,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

// ─── Departments ─────────────────────────────────────────────────────────────

pub struct RawDepartment {
  pub department_id: String,
  pub name:          String,
  pub description:   Option<String>,
  pub created_at:    String,
}

impl RawDepartment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      department_id: row.get(0)?,
      name:          row.get(1)?,
      description:   row.get(2)?,
      created_at:    row.get(3)?,
    })
  }

  pub fn into_department(self) -> Result<Department> {
    Ok(Department {
      department_id: decode_uuid(&self.department_id)?,
      name:          self.name,
      description:   self.description,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
