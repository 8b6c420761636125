//! Department: an organisational unit employees belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub department_id: Uuid,
  /// Unique across departments.
  pub name:          String,
  pub description:   Option<String>,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>,
}

impl NewDepartment {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), description: None }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.name.trim().is_empty() {
      return Err(ValidationError::MissingField("name"));
    }
    Ok(())
  }

  pub fn into_department(self, department_id: Uuid, created_at: DateTime<Utc>) -> Department {
    Department { department_id, name: self.name, description: self.description, created_at }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPatch {
  pub name:        Option<String>,
  #[serde(default, deserialize_with = "crate::nullable::deserialize", skip_serializing_if = "Option::is_none")]
  pub description: Option<Option<String>>,
}

impl DepartmentPatch {
  pub fn apply_to(self, department: &mut Department) {
    if let Some(v) = self.name {
      department.name = v;
    }
    if let Some(v) = self.description {
      department.description = v;
    }
  }
}
