//! The `ContactStore` trait and its supporting types.
//!
//! The trait is implemented by storage backends (e.g. `agenda-store-sqlite`).
//! The resource operations and the HTTP layer depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactChanges, NewContact},
  page::{Page, PageRequest},
};

/// A column carrying a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
  Email,
  Cpf,
}

impl UniqueField {
  /// The field name as it appears in payloads and in the table.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Cpf => "cpf",
    }
  }
}

/// Errors a backend may surface.
///
/// Backends must enforce uniqueness of `email` and `cpf` at write time and
/// report a violation through [`StoreError::unique_violation`], so that a
/// write racing past the pre-check is still reported as a duplicate.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn unique_violation(&self) -> Option<UniqueField>;
}

/// Abstraction over the contact persistence collaborator.
///
/// Every method is a single atomic unit against the backing store.
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new contact, assigning `id` and both timestamps.
  fn insert(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Apply `changes` to the contact with `id` and bump `updated_at`.
  /// Returns `None` if no such contact exists.
  fn update_by_id(
    &self,
    id: i64,
    changes: ContactChanges,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Permanently remove a contact. Returns `false` if it did not exist.
  fn delete_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// One page of contacts ordered by descending `id` (newest first).
  fn list_page_descending(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<Page<Contact>, Self::Error>> + Send + '_;

  /// Whether some contact other than `excluding` already holds `value` in
  /// `field`. `value` is compared in its stored form.
  fn is_taken<'a>(
    &'a self,
    field: UniqueField,
    value: &'a str,
    excluding: Option<i64>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
