//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use agenda_core::{
  contact::{Contact, ContactChanges, NewContact},
  page::{Page, PageRequest},
  store::{ContactStore, UniqueField},
};

use crate::{
  Error, Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "sqlite store ready");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewContact) -> Result<Contact> {
    let now_str = encode_dt(Utc::now());

    let raw: RawContact = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO contacts (name, email, cpf, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {CONTACT_COLUMNS}"
          ),
          rusqlite::params![input.name, input.email, input.cpf, now_str],
          RawContact::from_row,
        )?)
      })
      .await?;

    raw.into_contact()
  }

  async fn update_by_id(&self, id: i64, changes: ContactChanges) -> Result<Option<Contact>> {
    let now_str = encode_dt(Utc::now());

    // NULL parameters keep the stored value.
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE contacts SET
                   name       = COALESCE(?2, name),
                   email      = COALESCE(?3, email),
                   cpf        = COALESCE(?4, cpf),
                   updated_at = ?5
                 WHERE id = ?1
                 RETURNING {CONTACT_COLUMNS}"
              ),
              rusqlite::params![id, changes.name, changes.email, changes.cpf, now_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete_by_id(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(affected > 0)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list_page_descending(&self, request: PageRequest) -> Result<Page<Contact>> {
    let limit_val  = i64::from(request.per_page());
    let offset_val = i64::try_from(request.offset()).unwrap_or(i64::MAX);

    // Count and scan inside one read transaction so `total` matches `data`.
    let (total, raws): (i64, Vec<RawContact>) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?;
        let rows = {
          let mut stmt = tx.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id DESC LIMIT ?1 OFFSET ?2"
          ))?;
          stmt
            .query_map(rusqlite::params![limit_val, offset_val], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        Ok((total, rows))
      })
      .await?;

    let data = raws
      .into_iter()
      .map(RawContact::into_contact)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::new(data, request, total.max(0) as u64))
  }

  async fn is_taken(
    &self,
    field: UniqueField,
    value: &str,
    excluding: Option<i64>,
  ) -> Result<bool> {
    // `as_str` is also the column name; the email column compares NOCASE.
    let sql = format!(
      "SELECT EXISTS(
         SELECT 1 FROM contacts WHERE {} = ?1 AND (?2 IS NULL OR id != ?2)
       )",
      field.as_str()
    );
    let value = value.to_owned();

    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params![value, excluding], |r| r.get(0))?)
      })
      .await?;

    Ok(taken)
  }
}
