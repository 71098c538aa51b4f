//! In-memory [`ContactStore`] used by the resource-operation tests.

use std::{collections::BTreeMap, sync::Mutex};

use chrono::Utc;
use thiserror::Error;

use crate::{
  contact::{Contact, ContactChanges, NewContact},
  page::{Page, PageRequest},
  store::{ContactStore, StoreError, UniqueField},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("duplicate {}", .0.as_str())]
  Duplicate(UniqueField),
}

impl StoreError for MemoryError {
  fn unique_violation(&self) -> Option<UniqueField> {
    match self {
      Self::Duplicate(field) => Some(*field),
    }
  }
}

#[derive(Default)]
struct State {
  last_id: i64,
  rows:    BTreeMap<i64, Contact>,
  /// When set, `is_taken` always answers `false`, simulating a concurrent
  /// writer that lands between the pre-check and the write.
  blind:   bool,
}

#[derive(Default)]
pub struct MemoryStore {
  state: Mutex<State>,
}

impl MemoryStore {
  pub fn blind_prechecks(&self) { self.state.lock().unwrap().blind = true; }
}

fn holds(contact: &Contact, field: UniqueField, value: &str) -> bool {
  match field {
    UniqueField::Email => contact.email.eq_ignore_ascii_case(value),
    UniqueField::Cpf => contact.cpf == value,
  }
}

fn conflict(state: &State, email: &str, cpf: &str, excluding: Option<i64>) -> Option<UniqueField> {
  [(UniqueField::Email, email), (UniqueField::Cpf, cpf)]
    .into_iter()
    .find(|(field, value)| {
      state
        .rows
        .values()
        .any(|c| Some(c.id) != excluding && holds(c, *field, value))
    })
    .map(|(field, _)| field)
}

impl ContactStore for MemoryStore {
  type Error = MemoryError;

  async fn insert(&self, input: NewContact) -> Result<Contact, MemoryError> {
    let mut state = self.state.lock().unwrap();
    if let Some(field) = conflict(&state, &input.email, &input.cpf, None) {
      return Err(MemoryError::Duplicate(field));
    }

    state.last_id += 1;
    let now = Utc::now();
    let contact = Contact {
      id:         state.last_id,
      name:       input.name,
      email:      input.email,
      cpf:        input.cpf,
      created_at: now,
      updated_at: now,
    };
    state.rows.insert(contact.id, contact.clone());
    Ok(contact)
  }

  async fn update_by_id(
    &self,
    id: i64,
    changes: ContactChanges,
  ) -> Result<Option<Contact>, MemoryError> {
    let mut state = self.state.lock().unwrap();
    let Some(mut contact) = state.rows.get(&id).cloned() else {
      return Ok(None);
    };

    if let Some(name) = changes.name {
      contact.name = name;
    }
    if let Some(email) = changes.email {
      contact.email = email;
    }
    if let Some(cpf) = changes.cpf {
      contact.cpf = cpf;
    }
    if let Some(field) = conflict(&state, &contact.email, &contact.cpf, Some(id)) {
      return Err(MemoryError::Duplicate(field));
    }

    contact.updated_at = Utc::now();
    state.rows.insert(id, contact.clone());
    Ok(Some(contact))
  }

  async fn delete_by_id(&self, id: i64) -> Result<bool, MemoryError> {
    Ok(self.state.lock().unwrap().rows.remove(&id).is_some())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, MemoryError> {
    Ok(self.state.lock().unwrap().rows.get(&id).cloned())
  }

  async fn list_page_descending(
    &self,
    request: PageRequest,
  ) -> Result<Page<Contact>, MemoryError> {
    let state = self.state.lock().unwrap();
    let data = state
      .rows
      .values()
      .rev()
      .skip(request.offset() as usize)
      .take(request.per_page() as usize)
      .cloned()
      .collect();
    Ok(Page::new(data, request, state.rows.len() as u64))
  }

  async fn is_taken(
    &self,
    field: UniqueField,
    value: &str,
    excluding: Option<i64>,
  ) -> Result<bool, MemoryError> {
    let state = self.state.lock().unwrap();
    if state.blind {
      return Ok(false);
    }
    Ok(
      state
        .rows
        .values()
        .any(|c| Some(c.id) != excluding && holds(c, field, value)),
    )
  }
}
