//! The uniform response envelope.
//!
//! Every route answers with `{status, message, error, data}`: `error` is
//! empty on success, `data` is an empty object on failure. Clients branch on
//! `status` and the HTTP code; `message` is for humans.

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub status:  bool,
  pub message: String,
  pub error:   String,
  pub data:    T,
}

/// Success envelope around `data`.
pub fn ok<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
  Json(Envelope {
    status:  true,
    message: message.to_owned(),
    error:   String::new(),
    data,
  })
}

/// Failure envelope. `error` carries the raw detail for debuggability; it
/// must never contain the signing secret or another request's data.
pub fn fail(message: &str, error: &str) -> Json<Envelope<Value>> {
  Json(Envelope {
    status:  false,
    message: message.to_owned(),
    error:   error.to_owned(),
    data:    Value::Object(Map::new()),
  })
}
