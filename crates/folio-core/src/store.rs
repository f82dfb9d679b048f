//! The `BookStore` and `UserStore` traits.
//!
//! Implemented by storage backends (e.g. `folio-store-sqlite`). The HTTP
//! layer depends on these abstractions, not on any concrete backend.

use std::future::Future;

use crate::{
  book::{Book, BookUpdate, NewBook},
  user::{NewUser, User, UserUpdate},
};

// ─── Books ───────────────────────────────────────────────────────────────────

/// Abstraction over the book collection, keyed by numeric id.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BookStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a book by id. Returns `None` if not found.
  fn find_book(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send + '_;

  /// List every book in the collection.
  fn list_books(
    &self,
  ) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send + '_;

  /// Persist a new book and return it with its assigned id.
  fn insert_book(
    &self,
    input: NewBook,
  ) -> impl Future<Output = Result<Book, Self::Error>> + Send + '_;

  /// Replace the title and description of an existing book.
  ///
  /// Ownership is checked by the caller before this runs; the window between
  /// that check and this write is an accepted race (a concurrent delete of
  /// the same book surfaces as a not-found error here).
  fn update_book(
    &self,
    input: BookUpdate,
  ) -> impl Future<Output = Result<Book, Self::Error>> + Send + '_;

  /// Delete a book by id.
  fn delete_book(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Abstraction over the user directory.
///
/// The auth subsystem consumes this only at token issuance (login/register);
/// after that the token alone carries identity.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new user account.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn find_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by email. Returns `None` if not found.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// List all user accounts.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Update a user's own profile fields.
  fn update_user(
    &self,
    input: UserUpdate,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;
}
