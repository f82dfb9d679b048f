//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Token and parse failures are converted to enveloped responses here, at the
//! boundary — they never propagate as faults that could take the process
//! down. The one exception is [`ApiError::Invariant`]: a token that passed
//! the auth gate but cannot be interpreted afterwards means the gate's
//! guarantee was broken, and that is logged and answered as a server error.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{auth::token::TokenError, response};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("no Authorization header")]
  MissingToken,

  #[error(transparent)]
  Token(#[from] TokenError),

  #[error("email or password is wrong")]
  InvalidCredentials,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("you are not the owner of this record")]
  NotOwner,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  /// Gate invariant violation — see module docs.
  #[error("auth invariant violated: {0}")]
  Invariant(#[from] folio_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::MissingToken | ApiError::Token(_) => {
        (StatusCode::UNAUTHORIZED, "Unauthorized")
      }
      ApiError::InvalidCredentials => {
        (StatusCode::UNAUTHORIZED, "Invalid credential")
      }
      ApiError::BadRequest(_) => {
        (StatusCode::BAD_REQUEST, "Failed to process request")
      }
      ApiError::NotOwner => (StatusCode::FORBIDDEN, "You are not the owner"),
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Data not found"),
      ApiError::EmailTaken(_) => {
        (StatusCode::CONFLICT, "Failed to process request")
      }
      ApiError::Invariant(_) | ApiError::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
      }
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
      tracing::error!(error = %self, "request failed");
    }

    (status, response::fail(message, &self.to_string())).into_response()
  }
}
