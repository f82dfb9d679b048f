//! Error type for `folio-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Unique-constraint violation on `users.email`.
  #[error("email already registered: {0}")]
  EmailTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
