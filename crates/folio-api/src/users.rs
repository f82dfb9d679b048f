//! Handlers for `/api/user` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/user` | All accounts |
//! | `GET`  | `/api/user/profile` | The authenticated user's own record |
//! | `PUT`  | `/api/user/update` | Own profile only; target id comes from the token |

use axum::{
  extract::{Json, State, rejection::JsonRejection},
  response::IntoResponse,
};
use folio_core::{store::UserStore, user::UserUpdate};
use serde::Deserialize;

use crate::{AppState, auth::Subject, auth::password, error::ApiError, response};

/// `GET /api/user`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _subject: Subject,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let users = state
    .store
    .list_users()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(response::ok("OK!", users))
}

/// `GET /api/user/profile`
pub async fn profile<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let id = subject.numeric_id()?;
  let user = state
    .store
    .find_user(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("no user with id {id}")))?;
  Ok(response::ok("OK!", user))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub name:     String,
  pub email:    String,
  /// Absent means "keep the current password".
  pub password: Option<String>,
}

/// `PUT /api/user/update`
///
/// The updated account is always the authenticated subject's own; any id in
/// the body is ignored.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
  body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;
  let id = subject.numeric_id()?;

  // The target email may only be in use by the account being updated.
  if let Some(existing) = state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    && existing.id != id
  {
    return Err(ApiError::EmailTaken(body.email));
  }

  let password_hash = body.password.as_deref().map(password::hash).transpose()?;

  let user = state
    .store
    .update_user(UserUpdate {
      id,
      name: body.name,
      email: body.email,
      password_hash,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(response::ok("OK!", user))
}
