//! Handlers for `/api/books` endpoints — the ownership-gated resource.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/books` | All books |
//! | `POST`   | `/api/books` | Owner stamped from the token, 201 |
//! | `GET`    | `/api/books/{id}` | 404 if absent |
//! | `PUT`    | `/api/books/{id}` | Owner only; 403 otherwise |
//! | `DELETE` | `/api/books/{id}` | Owner only; 403 otherwise |
//!
//! Mutations run the ownership check fresh on every request. The window
//! between that check and the write is not transactional; a book deleted
//! concurrently in that window surfaces as a store-level not-found, which is
//! an accepted race.

use axum::{
  extract::{Json, Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use folio_core::{
  book::{BookUpdate, NewBook},
  ownership::{self, OwnershipDecision},
  store::BookStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, auth::Subject, error::ApiError, response};

/// Parse a path segment into a book id; 400 on anything non-numeric.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("{raw:?} is not a valid book id")))
}

/// Run the ownership check and convert deny/absent into the right error.
async fn require_owner<S>(
  state: &AppState<S>,
  subject: &Subject,
  book_id: i64,
) -> Result<(), ApiError>
where
  S: BookStore,
{
  let decision = ownership::check_edit(&*state.store, &subject.id, book_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  match decision {
    OwnershipDecision::Permitted => Ok(()),
    OwnershipDecision::NotOwner => Err(ApiError::NotOwner),
    OwnershipDecision::NotFound => {
      Err(ApiError::NotFound(format!("no book with id {book_id}")))
    }
  }
}

/// Client-supplied book content. Deliberately has no owner field: whatever
/// the client sends for ownership is never read.
#[derive(Debug, Deserialize)]
pub struct BookBody {
  pub title:       String,
  #[serde(default)]
  pub description: String,
}

/// `GET /api/books`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _subject: Subject,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookStore,
{
  let books = state
    .store
    .list_books()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(response::ok("OK!", books))
}

/// `GET /api/books/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  _subject: Subject,
  Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookStore,
{
  let id = parse_id(&raw_id)?;
  let book = state
    .store
    .find_book(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("no book with id {id}")))?;
  Ok(response::ok("OK!", book))
}

/// `POST /api/books`
///
/// No ownership check — the book does not exist yet. The owner is
/// unconditionally the authenticated subject.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
  body: Result<Json<BookBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let book = state
    .store
    .insert_book(NewBook {
      title:       body.title,
      description: body.description,
      owner_id:    subject.numeric_id()?,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(book_id = book.id, owner_id = book.owner_id, "book created");
  Ok((StatusCode::CREATED, response::ok("OK!", book)))
}

/// `PUT /api/books/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
  Path(raw_id): Path<String>,
  body: Result<Json<BookBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookStore,
{
  let id = parse_id(&raw_id)?;

  // Ownership is decided before the body is even looked at, so a non-owner
  // learns nothing from the shape of their payload.
  require_owner(&state, &subject, id).await?;

  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let book = state
    .store
    .update_book(BookUpdate {
      id,
      title: body.title,
      description: body.description,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(response::ok("OK!", book))
}

/// `DELETE /api/books/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  subject: Subject,
  Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookStore,
{
  let id = parse_id(&raw_id)?;

  require_owner(&state, &subject, id).await?;

  state
    .store
    .delete_book(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(response::ok("Deleted", json!({})))
}
