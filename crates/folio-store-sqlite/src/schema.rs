//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- owner_id is written once at insert and never updated afterwards.
CREATE TABLE IF NOT EXISTS books (
    book_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    owner_id    INTEGER NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS books_owner_idx ON books(owner_id);

PRAGMA user_version = 1;
";
