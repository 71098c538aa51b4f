//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use agenda_core::contact::Contact;
use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Column list shared by every query that yields a [`RawContact`].
pub const CONTACT_COLUMNS: &str = "id, name, email, cpf, created_at, updated_at";

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `contacts` row as read from SQLite, before timestamp parsing.
pub struct RawContact {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub cpf:        String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawContact {
  /// Row mapper for statements selecting [`CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      cpf:        row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         self.id,
      name:       self.name,
      email:      self.email,
      cpf:        self.cpf,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
