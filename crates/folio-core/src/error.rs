//! Error types for `folio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("book not found: {0}")]
  BookNotFound(i64),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  /// A token subject claim that should carry a numeric user id but does not.
  /// Reaching this after the request passed the auth gate means a token was
  /// issued with a bad subject, which is a server fault, not a client one.
  #[error("subject id {0:?} is not numeric")]
  NonNumericSubject(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
