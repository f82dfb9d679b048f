//! HTTP layer for the Folio book service.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`BookStore`] + [`UserStore`]. Identity is a signed bearer token; every
//! route except login/register sits behind the token gate, and book
//! mutations are additionally gated on ownership.

pub mod auth;
pub mod books;
pub mod error;
pub mod response;
pub mod sessions;
pub mod users;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use folio_core::store::{BookStore, UserStore};
use serde::Deserialize;

use auth::TokenCodec;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// HMAC secret for token signing. Read once at startup, never rotated
  /// during the process lifetime.
  pub jwt_secret: String,
  #[serde(default = "default_token_ttl_secs")]
  pub token_ttl_secs: i64,
}

fn default_token_ttl_secs() -> i64 {
  86_400
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub codec:  Arc<TokenCodec>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      codec:  self.codec.clone(),
      config: self.config.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BookStore + UserStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Identity-issuing routes; the only ones outside the token gate.
    .route("/api/auth/register", post(sessions::register::<S>))
    .route("/api/auth/login", post(sessions::login::<S>))
    // Users
    .route("/api/user", get(users::list::<S>))
    .route("/api/user/profile", get(users::profile::<S>))
    .route("/api/user/update", put(users::update::<S>))
    // Books
    .route("/api/books", get(books::list::<S>).post(books::create::<S>))
    .route(
      "/api/books/{id}",
      get(books::get_one::<S>)
        .put(books::update::<S>)
        .delete(books::delete::<S>),
    )
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
