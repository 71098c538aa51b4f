//! Error type for `agenda-store-sqlite`.

use agenda_core::store::{StoreError, UniqueField};
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  /// Recognise `UNIQUE constraint failed: contacts.<column>`.
  fn unique_violation(&self) -> Option<UniqueField> {
    let Self::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      err,
      Some(message),
    ))) = self
    else {
      return None;
    };

    if err.extended_code != ffi::SQLITE_CONSTRAINT_UNIQUE {
      return None;
    }
    if message.contains("contacts.email") {
      Some(UniqueField::Email)
    } else if message.contains("contacts.cpf") {
      Some(UniqueField::Cpf)
    } else {
      None
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
