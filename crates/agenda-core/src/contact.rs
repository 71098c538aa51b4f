//! The contact record and its write-side inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted contact. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  /// Digits only; see [`crate::cpf::normalize`].
  pub cpf:        String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::ContactStore::insert`].
///
/// `cpf` must already be normalized; timestamps and `id` are set by the store.
#[derive(Debug, Clone)]
pub struct NewContact {
  pub name:  String,
  pub email: String,
  pub cpf:   String,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactChanges {
  pub name:  Option<String>,
  pub email: Option<String>,
  pub cpf:   Option<String>,
}

impl ContactChanges {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.cpf.is_none()
  }
}
