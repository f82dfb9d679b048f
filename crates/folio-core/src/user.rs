//! User — an account in the user directory.
//!
//! Users authenticate with email + password and receive a bearer token whose
//! subject claim is the user id rendered as a string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user account.
///
/// The password hash is an argon2 PHC string. It never leaves the process:
/// serialisation skips it so it cannot end up in a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

/// Input for creating a user. The id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// Fields a user may change on their own account.
///
/// The target id is always the authenticated subject's own id; callers must
/// never take it from client input.
#[derive(Debug, Clone)]
pub struct UserUpdate {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  /// `None` leaves the stored hash untouched.
  pub password_hash: Option<String>,
}
