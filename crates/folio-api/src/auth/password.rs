//! Argon2 password hashing for the register/login flow.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::error::ApiError;

/// Hash a password into an argon2 PHC string.
pub fn hash(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Store(format!("password hashing failed: {e}").into()))
}

/// Verify a password against a stored PHC string.
///
/// An unparseable stored hash verifies as false rather than erroring; it is
/// indistinguishable from a wrong password to the caller.
pub fn verify(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .map(|parsed| {
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
    })
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let phc = hash("hunter2").unwrap();
    assert!(phc.starts_with("$argon2"));
    assert!(verify("hunter2", &phc));
    assert!(!verify("hunter3", &phc));
  }

  #[test]
  fn bad_stored_hash_verifies_false() {
    assert!(!verify("hunter2", "not-a-phc-string"));
  }
}
