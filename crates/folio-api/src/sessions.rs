//! Handlers for the identity-issuing routes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/auth/register` | Body: [`RegisterBody`]; 409 on duplicate email |
//! | `POST` | `/api/auth/login` | Body: [`LoginBody`]; 401 on bad credentials |
//!
//! These are the only routes that do not pass through the auth gate — by
//! definition, the caller does not have a token yet. Both answer with the
//! user record plus a freshly issued token.

use axum::{
  extract::{Json, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use folio_core::{store::UserStore, user::NewUser, user::User};
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::password, error::ApiError, response};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// What both routes hand back: the account and its bearer token.
#[derive(Debug, Serialize)]
pub struct SessionData {
  pub user:  User,
  pub token: String,
}

/// `POST /api/auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

  if state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some()
  {
    return Err(ApiError::EmailTaken(body.email));
  }

  let user = state
    .store
    .create_user(NewUser {
      name:          body.name,
      email:         body.email,
      password_hash: password::hash(&body.password)?,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let token = state.codec.issue(&user.id.to_string())?;
  tracing::info!(user_id = user.id, "user registered");

  Ok((
    StatusCode::CREATED,
    response::ok("OK!", SessionData { user, token }),
  ))
}

/// `POST /api/auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let user = state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::InvalidCredentials)?;

  if !password::verify(&body.password, &user.password_hash) {
    return Err(ApiError::InvalidCredentials);
  }

  let token = state.codec.issue(&user.id.to_string())?;
  Ok(response::ok("OK!", SessionData { user, token }))
}
