//! [`SqliteStore`] — the SQLite implementation of [`BookStore`] and
//! [`UserStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use folio_core::{
  book::{Book, BookUpdate, NewBook},
  store::{BookStore, UserStore},
  user::{NewUser, User, UserUpdate},
};

use crate::{
  encode::{RawBook, RawUser, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── BookStore impl ──────────────────────────────────────────────────────────

impl BookStore for SqliteStore {
  type Error = Error;

  async fn find_book(&self, id: i64) -> Result<Option<Book>> {
    let raw: Option<RawBook> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT book_id, title, description, owner_id, created_at
             FROM books WHERE book_id = ?1",
            rusqlite::params![id],
            RawBook::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawBook::into_book).transpose()
  }

  async fn list_books(&self) -> Result<Vec<Book>> {
    let raws: Vec<RawBook> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT book_id, title, description, owner_id, created_at
           FROM books ORDER BY book_id",
        )?;
        let rows = stmt
          .query_map([], RawBook::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBook::into_book).collect()
  }

  async fn insert_book(&self, input: NewBook) -> Result<Book> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let NewBook { title, description, owner_id } = input;

    let (id, title, description) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO books (title, description, owner_id, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![title, description, owner_id, at_str],
        )?;
        Ok((conn.last_insert_rowid(), title, description))
      })
      .await?;

    Ok(Book { id, title, description, owner_id, created_at })
  }

  async fn update_book(&self, input: BookUpdate) -> Result<Book> {
    let BookUpdate { id, title, description } = input;

    let raw: Option<RawBook> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE books SET title = ?1, description = ?2 WHERE book_id = ?3",
          rusqlite::params![title, description, id],
        )?;
        Ok(conn
          .query_row(
            "SELECT book_id, title, description, owner_id, created_at
             FROM books WHERE book_id = ?1",
            rusqlite::params![id],
            RawBook::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or(Error::Core(folio_core::Error::BookNotFound(id)))?
      .into_book()
  }

  async fn delete_book(&self, id: i64) -> Result<()> {
    // Deleting an already-deleted book is a no-op: the ownership check ran
    // earlier and the check-then-write window is an accepted race.
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM books WHERE book_id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let NewUser { name, email, password_hash } = input;
    let email_for_err = email.clone();

    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (name, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, email, password_hash, at_str],
        )?;
        Ok((conn.last_insert_rowid(), name, email, password_hash))
      })
      .await;

    match result {
      Ok((id, name, email, password_hash)) => {
        Ok(User { id, name, email, password_hash, created_at })
      }
      Err(e) if is_unique_violation(&e) => Err(Error::EmailTaken(email_for_err)),
      Err(e) => Err(e.into()),
    }
  }

  async fn find_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, name, email, password_hash, created_at
             FROM users WHERE user_id = ?1",
            rusqlite::params![id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, name, email, password_hash, created_at
             FROM users WHERE email = ?1",
            rusqlite::params![email],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, name, email, password_hash, created_at
           FROM users ORDER BY user_id",
        )?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn update_user(&self, input: UserUpdate) -> Result<User> {
    let UserUpdate { id, name, email, password_hash } = input;
    let email_for_err = email.clone();

    let result: std::result::Result<Option<RawUser>, tokio_rusqlite::Error> = self
      .conn
      .call(move |conn| {
        match &password_hash {
          Some(hash) => conn.execute(
            "UPDATE users SET name = ?1, email = ?2, password_hash = ?3
             WHERE user_id = ?4",
            rusqlite::params![name, email, hash, id],
          )?,
          None => conn.execute(
            "UPDATE users SET name = ?1, email = ?2 WHERE user_id = ?3",
            rusqlite::params![name, email, id],
          )?,
        };
        Ok(conn
          .query_row(
            "SELECT user_id, name, email, password_hash, created_at
             FROM users WHERE user_id = ?1",
            rusqlite::params![id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await;

    let raw = match result {
      Ok(raw) => raw,
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::EmailTaken(email_for_err));
      }
      Err(e) => return Err(e.into()),
    };

    raw
      .ok_or(Error::Core(folio_core::Error::UserNotFound(id)))?
      .into_user()
  }
}
