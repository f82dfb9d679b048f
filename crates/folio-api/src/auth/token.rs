//! Signed, time-bounded identity tokens.
//!
//! Tokens are JWTs signed with a single process-wide secret, HS256 only. The
//! algorithm is pinned at verification; whatever the token's own header
//! claims to be signed with is never trusted. There is no refresh, no
//! rotation, and no server-side revocation — a token is valid until its
//! fixed expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
  errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
  #[error("token malformed")]
  Malformed,

  #[error("token signature invalid")]
  SignatureInvalid,

  #[error("token expired")]
  Expired,

  #[error("token encoding failed: {0}")]
  Encode(#[source] jsonwebtoken::errors::Error),
}

/// The typed claim set carried by every token.
///
/// `sub` is the user id rendered as a string; it stays text end to end so
/// large ids survive every serialization boundary without precision loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  pub fn subject_id(&self) -> &str {
    &self.sub
  }
}

/// Issues and verifies identity tokens.
///
/// Holds the signing secret as immutable state injected at construction;
/// built once at startup and shared for the process lifetime.
pub struct TokenCodec {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  ttl:        Duration,
  validation: Validation,
}

impl TokenCodec {
  pub fn new(secret: &str, ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl,
      validation,
    }
  }

  /// Issue a token for `subject_id`, expiring a fixed duration from now.
  pub fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
      sub: subject_id.to_owned(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(TokenError::Encode)
  }

  /// Verify a token and return its claims.
  ///
  /// Failure taxonomy: [`TokenError::Malformed`] for anything that does not
  /// parse as a JWT, [`TokenError::SignatureInvalid`] for a bad signature or
  /// an algorithm other than HS256, [`TokenError::Expired`] once the expiry
  /// has passed.
  pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(token, &self.decoding, &self.validation)
      .map(|data| data.claims)
      .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn codec(secret: &str) -> TokenCodec {
    TokenCodec::new(secret, Duration::hours(1))
  }

  #[test]
  fn round_trip_before_expiry() {
    let c = codec("topsecret");
    let token = c.issue("42").unwrap();
    let claims = c.verify(&token).unwrap();
    assert_eq!(claims.subject_id(), "42");
    assert!(claims.exp > claims.iat);
  }

  #[test]
  fn expired_token_fails_as_expired() {
    let c = TokenCodec::new("topsecret", Duration::seconds(-60));
    let token = c.issue("42").unwrap();
    assert!(matches!(c.verify(&token), Err(TokenError::Expired)));
  }

  #[test]
  fn foreign_secret_fails_as_signature_invalid() {
    let token = codec("secret-a").issue("42").unwrap();
    let result = codec("secret-b").verify(&token);
    assert!(matches!(result, Err(TokenError::SignatureInvalid)));
  }

  #[test]
  fn algorithm_substitution_is_rejected() {
    // Same secret, but signed HS384: the pinned validation must refuse it
    // rather than honour the algorithm named in the token header.
    let c = codec("topsecret");
    let claims = Claims {
      sub: "42".into(),
      iat: Utc::now().timestamp(),
      exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    let forged = encode(
      &Header::new(Algorithm::HS384),
      &claims,
      &EncodingKey::from_secret(b"topsecret"),
    )
    .unwrap();
    assert!(matches!(c.verify(&forged), Err(TokenError::SignatureInvalid)));
  }

  #[test]
  fn garbage_fails_as_malformed() {
    let c = codec("topsecret");
    for garbage in ["", "not-a-token", "a.b", "a.b.c.d"] {
      assert!(
        matches!(c.verify(garbage), Err(TokenError::Malformed)),
        "input {garbage:?} should be malformed"
      );
    }
  }

  #[test]
  fn tampered_payload_fails() {
    let c = codec("topsecret");
    let token = c.issue("42").unwrap();
    // Swap the payload segment for one claiming a different subject.
    let parts: Vec<&str> = token.split('.').collect();
    let other = c.issue("7").unwrap();
    let other_payload = other.split('.').nth(1).unwrap();
    let forged = format!("{}.{}.{}", parts[0], other_payload, parts[2]);
    assert!(c.verify(&forged).is_err());
  }
}
