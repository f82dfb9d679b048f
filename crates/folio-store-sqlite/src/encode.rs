//! Decoding helpers between SQLite rows and domain types.
//!
//! Timestamps are stored as RFC 3339 strings. Raw structs capture a row
//! inside the connection closure; conversion to domain types (which can fail
//! on a bad timestamp) happens after the call returns.

use chrono::{DateTime, Utc};
use folio_core::{book::Book, user::User};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub struct RawUser {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      password_hash: row.get(3)?,
      created_at:    row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      name:          self.name,
      email:         self.email,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawBook {
  pub id:          i64,
  pub title:       String,
  pub description: String,
  pub owner_id:    i64,
  pub created_at:  String,
}

impl RawBook {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      owner_id:    row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_book(self) -> Result<Book> {
    Ok(Book {
      id:          self.id,
      title:       self.title,
      description: self.description,
      owner_id:    self.owner_id,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
