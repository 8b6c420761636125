//! API error type and [`axum::response::IntoResponse`] implementation.

use assetdesk_core::ValidationError;
use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The request body was not acceptable JSON for the endpoint.
  #[error(transparent)]
  Body(#[from] JsonRejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<assetdesk_core::Error> for ApiError {
  fn from(e: assetdesk_core::Error) -> Self {
    use assetdesk_core::Error as E;
    match e {
      E::Validation(v) => Self::Validation(v),
      E::EmployeeNotFound(id) => Self::NotFound(format!("employee {id} not found")),
      E::AssetNotFound(id) => Self::NotFound(format!("asset {id} not found")),
      E::Store(inner) => Self::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Validation(v) => (StatusCode::UNPROCESSABLE_ENTITY, v.to_string()),
      ApiError::Body(r) => (r.status(), r.body_text()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// JSON request body whose rejections use the `{"error": ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
