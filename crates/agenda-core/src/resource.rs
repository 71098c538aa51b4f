//! The contact resource operations: list, create, show, update, delete.
//!
//! Each operation validates, normalizes, and then issues a single store call.
//! Uniqueness is pre-checked here for field-level messages and enforced again
//! by the store at write time; both paths yield the same duplicate error.

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  contact::{Contact, ContactChanges, NewContact},
  cpf,
  page::{Page, PageRequest},
  store::{ContactStore, StoreError, UniqueField},
  validate::{ContactPayload, CreateFields, Mode, ValidationErrors, validate, validate_create},
};

fn store_err<E: StoreError>(e: E) -> Error { Error::Store(Box::new(e)) }

fn duplicate_message(field: UniqueField) -> String {
  format!("The {} has already been taken.", field.as_str())
}

/// Translate a write failure, turning a constraint violation into the same
/// validation error a pre-check would have produced.
fn write_err<E: StoreError>(e: E) -> Error {
  match e.unique_violation() {
    Some(field) => {
      warn!(field = field.as_str(), "unique constraint rejected write after pre-check");
      let mut errors = ValidationErrors::new();
      errors.add(field.as_str(), duplicate_message(field));
      Error::Validation(errors)
    }
    None => store_err(e),
  }
}

/// Pre-check the supplied unique values. `cpf` must already be normalized.
async fn check_unique<S: ContactStore>(
  store: &S,
  email: Option<&str>,
  cpf: Option<&str>,
  excluding: Option<i64>,
) -> Result<()> {
  let mut errors = ValidationErrors::new();

  for (field, value) in [(UniqueField::Email, email), (UniqueField::Cpf, cpf)] {
    let Some(value) = value else { continue };
    if store.is_taken(field, value, excluding).await.map_err(store_err)? {
      errors.add(field.as_str(), duplicate_message(field));
    }
  }

  if errors.is_empty() { Ok(()) } else { Err(Error::Validation(errors)) }
}

/// Contacts ordered newest first.
pub async fn list<S: ContactStore>(store: &S, request: PageRequest) -> Result<Page<Contact>> {
  debug!(page = request.page(), per_page = request.per_page(), "listing contacts");
  store.list_page_descending(request).await.map_err(store_err)
}

pub async fn create<S: ContactStore>(store: &S, payload: ContactPayload) -> Result<Contact> {
  debug!("creating contact");
  let CreateFields { name, email, cpf: raw_cpf } =
    validate_create(&payload).map_err(Error::Validation)?;

  let cpf = cpf::normalize(&raw_cpf);
  check_unique(store, Some(&email), Some(&cpf), None).await?;

  let contact = store
    .insert(NewContact { name, email, cpf })
    .await
    .map_err(write_err)?;

  info!(id = contact.id, "contact created");
  Ok(contact)
}

pub async fn show<S: ContactStore>(store: &S, id: i64) -> Result<Contact> {
  debug!(id, "fetching contact");
  store
    .find_by_id(id)
    .await
    .map_err(store_err)?
    .ok_or(Error::NotFound(id))
}

/// Partial update; fields absent from `payload` keep their stored values.
pub async fn update<S: ContactStore>(
  store: &S,
  id: i64,
  payload: ContactPayload,
) -> Result<Contact> {
  debug!(id, "updating contact");
  let current = show(store, id).await?;

  let fields = validate(&payload, Mode::Update).map_err(Error::Validation)?;
  let changes = ContactChanges {
    name:  fields.name,
    email: fields.email,
    cpf:   fields.cpf.as_deref().map(cpf::normalize),
  };

  if changes.is_empty() {
    return Ok(current);
  }

  check_unique(store, changes.email.as_deref(), changes.cpf.as_deref(), Some(id)).await?;

  let contact = store
    .update_by_id(id, changes)
    .await
    .map_err(write_err)?
    .ok_or(Error::NotFound(id))?;

  info!(id, "contact updated");
  Ok(contact)
}

pub async fn delete<S: ContactStore>(store: &S, id: i64) -> Result<()> {
  debug!(id, "deleting contact");
  if !store.delete_by_id(id).await.map_err(store_err)? {
    return Err(Error::NotFound(id));
  }
  info!(id, "contact deleted");
  Ok(())
}
