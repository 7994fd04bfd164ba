//! Error types for stocktake-cli

use thiserror::Error;

/// Result type alias for stocktake-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stocktake-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from stocktake-core
    #[error(transparent)]
    Core(#[from] stocktake_core::Error),

    /// Error from stocktake-store
    #[error(transparent)]
    Store(#[from] stocktake_store::Error),

    /// Error from stocktake-api
    #[error(transparent)]
    Api(#[from] stocktake_api::Error),

    /// Password hashing failure
    #[error(transparent)]
    Auth(#[from] stocktake_auth::AuthError),

    /// Terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command could not be carried out as asked
    #[error("{0}")]
    Command(String),
}

impl Error {
    /// Create a command error.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }
}
