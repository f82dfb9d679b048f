//! Book — the owned resource this service exists to guard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted book record.
///
/// `owner_id` is stamped from the creating subject's token at insert time and
/// is never reassigned afterwards. It is the sole input to authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub id:          i64,
  pub title:       String,
  pub description: String,
  pub owner_id:    i64,
  pub created_at:  DateTime<Utc>,
}

/// Input for creating a book. The id and timestamp are assigned by the store;
/// the owner comes from the authenticated subject, never from the client.
#[derive(Debug, Clone)]
pub struct NewBook {
  pub title:       String,
  pub description: String,
  pub owner_id:    i64,
}

/// Replacement content for an existing book. `owner_id` is intentionally
/// absent: ownership is immutable once set.
#[derive(Debug, Clone)]
pub struct BookUpdate {
  pub id:          i64,
  pub title:       String,
  pub description: String,
}
