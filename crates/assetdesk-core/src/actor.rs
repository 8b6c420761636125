//! The acting user recorded in history entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who performed a mutation. Passed explicitly into operations that record
/// history; there is no ambient session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  /// The actor used when no user is attached to the request.
  pub fn system() -> Self { Self("System".to_owned()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for Actor {
  fn default() -> Self { Self::system() }
}

impl fmt::Display for Actor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
