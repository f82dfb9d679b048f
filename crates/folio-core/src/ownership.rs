//! Ownership checks — the sole authorization rule in the system.
//!
//! A subject may mutate a book iff the book's `owner_id` equals the subject
//! id from their token. There are no roles, no admin override, and no group
//! ownership. Decisions are computed fresh per request and never cached; the
//! target book may have been created or deleted since the last look.

use crate::store::BookStore;

/// Outcome of an ownership check. Ephemeral, computed per request.
///
/// `NotFound` is kept distinct from `NotOwner` so the caller can answer 404
/// rather than 403 when the book does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
  Permitted,
  NotOwner,
  NotFound,
}

/// Look up the book and compare its owner against `subject_id`.
///
/// `subject_id` is the string form carried in the token; the stored owner id
/// is rendered the same way and compared with exact string equality.
pub async fn check_edit<S: BookStore>(
  store: &S,
  subject_id: &str,
  book_id: i64,
) -> Result<OwnershipDecision, S::Error> {
  match store.find_book(book_id).await? {
    None => Ok(OwnershipDecision::NotFound),
    Some(book) if book.owner_id.to_string() == subject_id => {
      Ok(OwnershipDecision::Permitted)
    }
    Some(_) => Ok(OwnershipDecision::NotOwner),
  }
}

/// Boolean convenience over [`check_edit`]: an absent book is simply "no".
pub async fn is_allowed_to_edit<S: BookStore>(
  store: &S,
  subject_id: &str,
  book_id: i64,
) -> Result<bool, S::Error> {
  Ok(check_edit(store, subject_id, book_id).await? == OwnershipDecision::Permitted)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::convert::Infallible;

  use chrono::Utc;

  use super::*;
  use crate::book::{Book, BookUpdate, NewBook};

  /// Fixed in-memory book collection; reads only.
  struct FixedStore {
    books: HashMap<i64, Book>,
  }

  impl FixedStore {
    fn with_book(id: i64, owner_id: i64) -> Self {
      let book = Book {
        id,
        title: "X".into(),
        description: String::new(),
        owner_id,
        created_at: Utc::now(),
      };
      Self { books: HashMap::from([(id, book)]) }
    }
  }

  impl BookStore for FixedStore {
    type Error = Infallible;

    async fn find_book(&self, id: i64) -> Result<Option<Book>, Infallible> {
      Ok(self.books.get(&id).cloned())
    }
    async fn list_books(&self) -> Result<Vec<Book>, Infallible> {
      Ok(self.books.values().cloned().collect())
    }
    async fn insert_book(&self, _: NewBook) -> Result<Book, Infallible> {
      unimplemented!()
    }
    async fn update_book(&self, _: BookUpdate) -> Result<Book, Infallible> {
      unimplemented!()
    }
    async fn delete_book(&self, _: i64) -> Result<(), Infallible> {
      unimplemented!()
    }
  }

  #[tokio::test]
  async fn owner_is_permitted() {
    let store = FixedStore::with_book(1, 7);
    let decision = check_edit(&store, "7", 1).await.unwrap();
    assert_eq!(decision, OwnershipDecision::Permitted);
    assert!(is_allowed_to_edit(&store, "7", 1).await.unwrap());
  }

  #[tokio::test]
  async fn non_owner_is_denied() {
    let store = FixedStore::with_book(1, 7);
    let decision = check_edit(&store, "9", 1).await.unwrap();
    assert_eq!(decision, OwnershipDecision::NotOwner);
    assert!(!is_allowed_to_edit(&store, "9", 1).await.unwrap());
  }

  #[tokio::test]
  async fn missing_book_is_not_found() {
    let store = FixedStore::with_book(1, 7);
    let decision = check_edit(&store, "7", 42).await.unwrap();
    assert_eq!(decision, OwnershipDecision::NotFound);
    assert!(!is_allowed_to_edit(&store, "7", 42).await.unwrap());
  }

  #[tokio::test]
  async fn comparison_is_exact_string_equality() {
    let store = FixedStore::with_book(1, 7);
    // "07" and "7 " must not match "7".
    assert!(!is_allowed_to_edit(&store, "07", 1).await.unwrap());
    assert!(!is_allowed_to_edit(&store, "7 ", 1).await.unwrap());
  }
}
