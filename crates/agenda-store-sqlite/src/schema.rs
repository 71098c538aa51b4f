//! SQL schema for the agenda SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete, so descending id
-- is always reverse creation order.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL COLLATE NOCASE,
    cpf         TEXT NOT NULL,   -- digits only
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at  TEXT NOT NULL,
    CONSTRAINT contacts_email_unique UNIQUE (email),
    CONSTRAINT contacts_cpf_unique   UNIQUE (cpf)
);

PRAGMA user_version = 1;
";
