//! Error types for stocktake-store

use thiserror::Error;

/// Result type alias for stocktake-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stocktake-store
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from stocktake-core
    #[error("Core error: {0}")]
    Core(#[from] stocktake_core::Error),

    /// Driver or server error from MongoDB
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A user with this username already exists
    #[error("User '{username}' already exists")]
    DuplicateUsername {
        /// The conflicting username
        username: String,
    },
}
