//! # stocktake-store
//!
//! Persistence for Stocktake products and user accounts.
//!
//! - [`ProductStore`] / [`UserStore`]: async traits the API and CLI program against
//! - [`MongoStore`]: MongoDB backend (collections `products` and `users`)
//! - [`MemoryStore`]: in-process backend for tests and dev mode

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod memory;
pub mod mongo;

pub use backend::{ProductStore, UserStore};
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Generate a fresh document id (24 hex characters).
pub fn new_object_id() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}
