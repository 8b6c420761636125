//! Error types for `assetdesk-core`.

use thiserror::Error;
use uuid::Uuid;

/// A user-correctable problem detected before any write is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("an employee must be selected")]
  EmployeeRequired,

  #[error("employee {0} does not exist")]
  UnknownEmployee(Uuid),

  #[error("asset {0} does not exist")]
  UnknownAsset(Uuid),

  #[error("select at least one asset or accessory")]
  EmptySelection,

  #[error("select at least one asset")]
  EmptyAssetBatch,

  #[error("required field is missing: {0}")]
  MissingField(&'static str),

  #[error("asset {0} is not available")]
  AssetUnavailable(Uuid),

  #[error("asset {0} cannot be changed in this term")]
  AssetLocked(Uuid),

  #[error("accessory key must not be empty")]
  EmptyAccessoryKey,

  #[error("schedule start and end are both required")]
  MissingScheduleWindow,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("employee not found: {0}")]
  EmployeeNotFound(Uuid),

  #[error("asset not found: {0}")]
  AssetNotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
