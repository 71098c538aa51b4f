//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/contacts` | Optional `?page=` and `?per_page=` (default 10); newest first |
//! | `POST`   | `/contacts` | Body: `{"name","email","cpf"}`; returns 201 + contact |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`/`PATCH` | `/contacts/{id}` | Any subset of the create body |
//! | `DELETE` | `/contacts/{id}` | 204, empty body |

use std::sync::Arc;

use agenda_core::{
  contact::Contact,
  page::{Page, PageRequest},
  resource,
  store::ContactStore,
  validate::ContactPayload,
};
use axum::{
  Json,
  body::Bytes,
  extract::{Path, Query, State, rejection::BytesRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// A non-numeric id cannot name a contact, so it is reported as not found.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::NotFound(format!("contact {raw} not found")))
}

/// Interpret a create/update body. A JSON object is read field by field; an
/// empty, `null`, non-object or unparseable body counts as no input, so the
/// validator reports the required fields instead of the transport failing.
/// The `Content-Type` header is not consulted.
pub fn parse_payload(body: &[u8]) -> ContactPayload {
  match serde_json::from_slice::<Value>(body) {
    Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
    _ => ContactPayload::default(),
  }
}

/// Parse a positive integer query value, ignoring anything else.
fn lenient_u32(raw: Option<&str>) -> Option<u32> {
  raw.and_then(|s| s.trim().parse().ok())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query values; malformed numbers fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub page:     Option<String>,
  pub per_page: Option<String>,
}

/// `GET /contacts[?page=<n>][&per_page=<n>]`
pub async fn list<S: ContactStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<Contact>>, ApiError> {
  let request = PageRequest::new(
    lenient_u32(params.page.as_deref()),
    lenient_u32(params.per_page.as_deref()),
  );
  Ok(Json(resource::list(&*store, request).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S: ContactStore>(
  State(store): State<Arc<S>>,
  body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let payload = parse_payload(&body?);
  let contact = resource::create(&*store, payload).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Show ─────────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn show<S: ContactStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
  let id = parse_id(&id)?;
  Ok(Json(resource::show(&*store, id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT|PATCH /contacts/{id}` — fields absent from the body are unchanged.
pub async fn update<S: ContactStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Bytes, BytesRejection>,
) -> Result<Json<Contact>, ApiError> {
  let id = parse_id(&id)?;
  let payload = match body {
    Ok(bytes) => parse_payload(&bytes),
    Err(rejection) => {
      // An unknown id still answers 404.
      resource::show(&*store, id).await?;
      return Err(rejection.into());
    }
  };
  Ok(Json(resource::update(&*store, id, payload).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}` — 204 with no body.
pub async fn destroy<S: ContactStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  let id = parse_id(&id)?;
  resource::delete(&*store, id).await?;
  Ok(StatusCode::NO_CONTENT)
}
