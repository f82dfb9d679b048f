//! Core types and trait definitions for the Folio book service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod book;
pub mod error;
pub mod ownership;
pub mod store;
pub mod user;

pub use error::{Error, Result};
