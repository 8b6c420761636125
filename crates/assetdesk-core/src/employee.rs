//! Employee: a member of staff who can hold assets and accessories.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::ValidationError;

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
pub enum EmployeeStatus {
  #[default]
  Active,
  OnLeave,
  Vacation,
  Inactive,
}

/// Accessory key → whether the employee currently holds it.
pub type AccessoryMap = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id:   Uuid,
  pub name:          String,
  pub email:         String,
  pub phone:         String,
  /// National taxpayer id, printed on term documents.
  pub cpf:           Option<String>,
  pub department_id: Option<Uuid>,
  pub position:      String,
  pub hire_date:     Option<NaiveDate>,
  pub status:        EmployeeStatus,
  pub accessories:   AccessoryMap,
  pub notes:         Option<String>,
  pub created_at:    DateTime<Utc>,
}

impl Employee {
  /// Keys of every accessory currently held, in key order.
  pub fn held_accessories(&self) -> impl Iterator<Item = &str> {
    self
      .accessories
      .iter()
      .filter(|(_, held)| **held)
      .map(|(k, _)| k.as_str())
  }
}

/// Input to [`crate::store::RecordStore::insert_employee`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
  pub name:          String,
  pub email:         String,
  pub phone:         String,
  #[serde(default)]
  pub cpf:           Option<String>,
  pub department_id: Option<Uuid>,
  pub position:      String,
  #[serde(default)]
  pub hire_date:     Option<NaiveDate>,
  #[serde(default)]
  pub status:        EmployeeStatus,
  #[serde(default = "default_accessories")]
  pub accessories:   AccessoryMap,
  #[serde(default)]
  pub notes:         Option<String>,
}

/// New employees start with the three desk accessories explicitly not held.
pub fn default_accessories() -> AccessoryMap {
  ["teclado", "mouse", "fone"]
    .into_iter()
    .map(|k| (k.to_owned(), false))
    .collect()
}

impl NewEmployee {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    phone: impl Into<String>,
    department_id: Uuid,
    position: impl Into<String>,
  ) -> Self {
    Self {
      name:          name.into(),
      email:         email.into(),
      phone:         phone.into(),
      cpf:           None,
      department_id: Some(department_id),
      position:      position.into(),
      hire_date:     None,
      status:        EmployeeStatus::default(),
      accessories:   default_accessories(),
      notes:         None,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    let required = [
      ("name", &self.name),
      ("email", &self.email),
      ("phone", &self.phone),
      ("position", &self.position),
    ];
    for (field, value) in required {
      if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
      }
    }
    if self.department_id.is_none() {
      return Err(ValidationError::MissingField("department_id"));
    }
    Ok(())
  }

  pub fn into_employee(self, employee_id: Uuid, created_at: DateTime<Utc>) -> Employee {
    Employee {
      employee_id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      cpf: self.cpf,
      department_id: self.department_id,
      position: self.position,
      hire_date: self.hire_date,
      status: self.status,
      accessories: self.accessories,
      notes: self.notes,
      created_at,
    }
  }
}

/// A partial update; see [`crate::asset::AssetPatch`] for the conventions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
  pub name:          Option<String>,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub cpf:           Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub department_id: Option<Option<Uuid>>,
  pub position:      Option<String>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub hire_date:     Option<Option<NaiveDate>>,
  pub status:        Option<EmployeeStatus>,
  /// Replaces the whole map.
  pub accessories:   Option<AccessoryMap>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub notes:         Option<Option<String>>,
}

impl EmployeePatch {
  pub fn apply_to(self, employee: &mut Employee) {
    if let Some(v) = self.name {
      employee.name = v;
    }
    if let Some(v) = self.email {
      employee.email = v;
    }
    if let Some(v) = self.phone {
      employee.phone = v;
    }
    if let Some(v) = self.cpf {
      employee.cpf = v;
    }
    if let Some(v) = self.department_id {
      employee.department_id = v;
    }
    if let Some(v) = self.position {
      employee.position = v;
    }
    if let Some(v) = self.hire_date {
      employee.hire_date = v;
    }
    if let Some(v) = self.status {
      employee.status = v;
    }
    if let Some(v) = self.accessories {
      employee.accessories = v;
    }
    if let Some(v) = self.notes {
      employee.notes = v;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn patch_distinguishes_missing_from_null() {
    let patch: EmployeePatch =
      serde_json::from_str(r#"{"cpf": null, "position": "Analyst"}"#).unwrap();
    assert_eq!(patch.cpf, Some(None));
    assert_eq!(patch.notes, None);
    assert_eq!(patch.position.as_deref(), Some("Analyst"));
  }

  #[test]
  fn new_employee_requires_department() {
    let mut input = NewEmployee::new("Ana", "ana@corp.example", "555-0100", Uuid::new_v4(), "Analyst");
    assert!(input.validate().is_ok());
    input.department_id = None;
    assert_eq!(
      input.validate(),
      Err(ValidationError::MissingField("department_id"))
    );
  }
}
