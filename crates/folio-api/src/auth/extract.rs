//! Bearer-token extractor — the authorization gate.
//!
//! Every route except login/register takes [`Subject`] as an extractor
//! parameter. Extraction verifies the token; any failure short-circuits the
//! request with 401 and an enveloped error before the handler body runs. The
//! subject id travels with the request through the extractor value — never
//! through globals.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::{AppState, error::ApiError};

/// The authenticated actor, as established by the gate.
#[derive(Debug, Clone)]
pub struct Subject {
  /// Subject id as carried in the token: the numeric user id as a string.
  pub id: String,
}

impl Subject {
  /// The subject id as the numeric key used by the stores.
  ///
  /// The gate only admits tokens this process issued, and it only ever
  /// issues numeric subjects — a parse failure here means that invariant
  /// broke, and it surfaces as a server error rather than being swallowed.
  pub fn numeric_id(&self) -> Result<i64, ApiError> {
    self.id.parse().map_err(|_| {
      ApiError::Invariant(folio_core::Error::NonNumericSubject(self.id.clone()))
    })
  }
}

/// Pull the token out of an `Authorization` header value.
///
/// The `Bearer ` scheme prefix is optional: some clients send the bare
/// token, and a missing prefix is not worth rejecting over.
fn strip_scheme(header_val: &str) -> &str {
  header_val
    .strip_prefix("Bearer ")
    .unwrap_or(header_val)
    .trim()
}

impl<S> FromRequestParts<AppState<S>> for Subject
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError::MissingToken)?;

    let claims = state.codec.verify(strip_scheme(header_val))?;
    Ok(Subject { id: claims.sub })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scheme_prefix_is_optional() {
    assert_eq!(strip_scheme("Bearer abc.def.ghi"), "abc.def.ghi");
    assert_eq!(strip_scheme("abc.def.ghi"), "abc.def.ghi");
    assert_eq!(strip_scheme("Bearer  abc "), "abc");
  }

  #[test]
  fn numeric_id_parses_or_flags_invariant() {
    let s = Subject { id: "42".into() };
    assert_eq!(s.numeric_id().unwrap(), 42);

    let bad = Subject { id: "forty-two".into() };
    assert!(matches!(bad.numeric_id(), Err(ApiError::Invariant(_))));
  }
}
