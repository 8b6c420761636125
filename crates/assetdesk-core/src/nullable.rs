//! Serde helper for `Option<Option<T>>` patch fields.
//!
//! A missing field deserialises to `None` (leave untouched) via
//! `#[serde(default)]`; an explicit `null` becomes `Some(None)` (clear).

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(d).map(Some)
}
