//! Error types for `agenda-core`.

use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more fields failed a constraint. Nothing was written.
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("contact not found: {0}")]
  NotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
