//! API error type and [`axum::response::IntoResponse`] implementation.

use agenda_core::validate::ValidationErrors;
use axum::{
  Json,
  extract::rejection::BytesRejection,
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

  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  /// The request body could not be read at all (e.g. over the size limit).
  #[error("unreadable body: {message}")]
  Body { status: StatusCode, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<agenda_core::Error> for ApiError {
  fn from(e: agenda_core::Error) -> Self {
    match e {
      agenda_core::Error::NotFound(id) => Self::NotFound(format!("contact {id} not found")),
      agenda_core::Error::Validation(errors) => Self::Validation(errors),
      agenda_core::Error::Store(e) => Self::Store(e),
    }
  }
}

impl From<BytesRejection> for ApiError {
  fn from(r: BytesRejection) -> Self {
    Self::Body { status: r.status(), message: r.body_text() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "message": m }))).into_response(),
      ApiError::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
          "message": "The given data was invalid.",
          "errors":  errors,
        })),
      )
        .into_response(),
      ApiError::Body { status, message } => {
        (status, Json(json!({ "message": message }))).into_response()
      }
      // Store details stay in the log.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": "Server Error" })),
        )
          .into_response()
      }
    }
  }
}
