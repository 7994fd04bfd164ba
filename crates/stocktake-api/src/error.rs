//! Error types for stocktake-api.
//!
//! [`Error`] covers server setup and lifecycle; [`ApiError`] is what request
//! handlers return and maps onto HTTP status codes with a JSON
//! `{ "message": ... }` body.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use stocktake_auth::AuthError;
use thiserror::Error;

/// Result type alias for stocktake-api setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from stocktake-core
    #[error("Core error: {0}")]
    Core(#[from] stocktake_core::Error),

    /// Error from stocktake-store
    #[error("Store error: {0}")]
    Store(#[from] stocktake_store::Error),

    /// Socket or listener failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by request handlers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed request body or failed validation (400)
    #[error("{0}")]
    BadRequest(String),

    /// Authentication or authorization failure (401/403)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Resource does not exist (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// Unique constraint violated (409)
    #[error("{0}")]
    Conflict(String),

    /// Storage failure (500)
    #[error("Store error: {0}")]
    Store(stocktake_store::Error),

    /// Workbook generation failure (500)
    #[error("Export error: {0}")]
    Export(#[from] stocktake_export::Error),

    /// Anything else unexpected (500)
    #[error("{0}")]
    Internal(String),
}

impl From<stocktake_core::Error> for ApiError {
    fn from(err: stocktake_core::Error) -> Self {
        match err {
            stocktake_core::Error::Validation { message, .. } => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<stocktake_store::Error> for ApiError {
    fn from(err: stocktake_store::Error) -> Self {
        match err {
            stocktake_store::Error::DuplicateUsername { .. } => {
                ApiError::Conflict(err.to_string())
            }
            stocktake_store::Error::Core(core) => core.into(),
            other => ApiError::Store(other),
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => e.status_code(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Export(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the client. Server-side detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Auth(e) => e.public_message().to_string(),
            _ if self.status_code().is_server_error() => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut response =
            (status, Json(serde_json::json!({ "message": self.public_message() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                http::header::WWW_AUTHENTICATE,
                http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
