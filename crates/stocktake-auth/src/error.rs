//! Auth-specific error types.

use http::StatusCode;
use stocktake_core::Role;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// Token format is invalid (not a valid JWT).
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// JWT signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token was issued by someone else.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// Username/password pair did not match a user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Authenticated, but the role does not allow the operation.
    #[error("role '{role}' is not allowed to modify inventory")]
    Forbidden {
        /// Role of the caller.
        role: Role,
    },

    /// Failed to sign a token.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Password hashing or verification failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Whether this error should result in a 4xx (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::Signing(_) | AuthError::Hashing(_))
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::Signing(_) | AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message safe to return to the client.
    ///
    /// Token failures collapse to one message so callers cannot probe
    /// which check failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Access token required",
            AuthError::InvalidFormat(_)
            | AuthError::InvalidSignature(_)
            | AuthError::Expired
            | AuthError::InvalidIssuer => "Invalid or expired token",
            AuthError::InvalidCredentials => "Invalid username or password",
            AuthError::Forbidden { .. } => "Insufficient permissions",
            AuthError::Signing(_) | AuthError::Hashing(_) => "Authentication service error",
        }
    }
}
