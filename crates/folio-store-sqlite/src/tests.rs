//! Integration tests for `SqliteStore` against an in-memory database.

use folio_core::{
  book::{BookUpdate, NewBook},
  store::{BookStore, UserStore},
  user::{NewUser, UserUpdate},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(email: &str) -> NewUser {
  NewUser {
    name:          "Alice".into(),
    email:         email.into(),
    password_hash: "$argon2id$stub".into(),
  }
}

async fn seeded_owner(s: &SqliteStore) -> i64 {
  s.create_user(new_user("owner@example.com")).await.unwrap().id
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;

  let user = s.create_user(new_user("alice@example.com")).await.unwrap();
  assert!(user.id > 0);

  let fetched = s.find_user(user.id).await.unwrap().unwrap();
  assert_eq!(fetched.email, "alice@example.com");
  assert_eq!(fetched.password_hash, "$argon2id$stub");
}

#[tokio::test]
async fn find_user_missing_returns_none() {
  let s = store().await;
  assert!(s.find_user(999).await.unwrap().is_none());
}

#[tokio::test]
async fn find_user_by_email() {
  let s = store().await;
  let user = s.create_user(new_user("bob@example.com")).await.unwrap();

  let fetched = s.find_user_by_email("bob@example.com").await.unwrap().unwrap();
  assert_eq!(fetched.id, user.id);

  assert!(s.find_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
  let s = store().await;
  s.create_user(new_user("dup@example.com")).await.unwrap();

  let err = s.create_user(new_user("dup@example.com")).await.unwrap_err();
  assert!(matches!(err, Error::EmailTaken(e) if e == "dup@example.com"));
}

#[tokio::test]
async fn list_users_returns_all() {
  let s = store().await;
  s.create_user(new_user("a@example.com")).await.unwrap();
  s.create_user(new_user("b@example.com")).await.unwrap();

  assert_eq!(s.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_user_without_password_keeps_hash() {
  let s = store().await;
  let user = s.create_user(new_user("carol@example.com")).await.unwrap();

  let updated = s
    .update_user(UserUpdate {
      id:            user.id,
      name:          "Caroline".into(),
      email:         "caroline@example.com".into(),
      password_hash: None,
    })
    .await
    .unwrap();

  assert_eq!(updated.name, "Caroline");
  assert_eq!(updated.email, "caroline@example.com");
  assert_eq!(updated.password_hash, user.password_hash);
}

#[tokio::test]
async fn update_user_with_password_replaces_hash() {
  let s = store().await;
  let user = s.create_user(new_user("dave@example.com")).await.unwrap();

  let updated = s
    .update_user(UserUpdate {
      id:            user.id,
      name:          user.name.clone(),
      email:         user.email.clone(),
      password_hash: Some("$argon2id$new".into()),
    })
    .await
    .unwrap();

  assert_eq!(updated.password_hash, "$argon2id$new");
}

#[tokio::test]
async fn update_user_to_taken_email_is_rejected() {
  let s = store().await;
  s.create_user(new_user("first@example.com")).await.unwrap();
  let second = s.create_user(new_user("second@example.com")).await.unwrap();

  let err = s
    .update_user(UserUpdate {
      id:            second.id,
      name:          second.name.clone(),
      email:         "first@example.com".into(),
      password_hash: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmailTaken(e) if e == "first@example.com"));

  // The account is untouched.
  let unchanged = s.find_user(second.id).await.unwrap().unwrap();
  assert_eq!(unchanged.email, "second@example.com");
}

#[tokio::test]
async fn update_missing_user_fails() {
  let s = store().await;
  let err = s
    .update_user(UserUpdate {
      id:            42,
      name:          "Ghost".into(),
      email:         "ghost@example.com".into(),
      password_hash: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(folio_core::Error::UserNotFound(42))));
}

// ─── Books ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_book() {
  let s = store().await;
  let owner = seeded_owner(&s).await;

  let book = s
    .insert_book(NewBook {
      title:       "Dune".into(),
      description: "Sand".into(),
      owner_id:    owner,
    })
    .await
    .unwrap();
  assert!(book.id > 0);
  assert_eq!(book.owner_id, owner);

  let fetched = s.find_book(book.id).await.unwrap().unwrap();
  assert_eq!(fetched, book);
}

#[tokio::test]
async fn find_book_missing_returns_none() {
  let s = store().await;
  assert!(s.find_book(1).await.unwrap().is_none());
}

#[tokio::test]
async fn list_books_in_id_order() {
  let s = store().await;
  let owner = seeded_owner(&s).await;

  for title in ["A", "B", "C"] {
    s.insert_book(NewBook {
      title:       title.into(),
      description: String::new(),
      owner_id:    owner,
    })
    .await
    .unwrap();
  }

  let all = s.list_books().await.unwrap();
  assert_eq!(all.len(), 3);
  assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn update_book_preserves_owner() {
  let s = store().await;
  let owner = seeded_owner(&s).await;

  let book = s
    .insert_book(NewBook {
      title:       "Draft".into(),
      description: "v1".into(),
      owner_id:    owner,
    })
    .await
    .unwrap();

  let updated = s
    .update_book(BookUpdate {
      id:          book.id,
      title:       "Final".into(),
      description: "v2".into(),
    })
    .await
    .unwrap();

  assert_eq!(updated.title, "Final");
  assert_eq!(updated.owner_id, owner);
  assert_eq!(updated.created_at, book.created_at);
}

#[tokio::test]
async fn update_missing_book_fails() {
  let s = store().await;
  let err = s
    .update_book(BookUpdate {
      id:          7,
      title:       "Ghost".into(),
      description: String::new(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(folio_core::Error::BookNotFound(7))));
}

#[tokio::test]
async fn delete_book_then_find_returns_none() {
  let s = store().await;
  let owner = seeded_owner(&s).await;

  let book = s
    .insert_book(NewBook {
      title:       "Doomed".into(),
      description: String::new(),
      owner_id:    owner,
    })
    .await
    .unwrap();

  s.delete_book(book.id).await.unwrap();
  assert!(s.find_book(book.id).await.unwrap().is_none());

  // A second delete of the same id is a quiet no-op.
  s.delete_book(book.id).await.unwrap();
}
