//! Authenticated user identity and extraction helpers.

use serde::{Deserialize, Serialize};
use stocktake_core::Role;

use crate::AuthError;

/// An authenticated user identity, extracted from a validated token.
///
/// Stored in HTTP request extensions by the auth middleware. Serializes to
/// the token claims the client sees on `/api/auth/verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user's store id.
    pub id: String,
    /// The user's login name.
    pub username: String,
    /// The user's role at the time the token was issued.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: u64,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

impl AuthenticatedUser {
    /// Fail with [`AuthError::Forbidden`] unless the role may modify inventory.
    pub fn require_modify(&self) -> Result<(), AuthError> {
        if self.role.can_modify() {
            Ok(())
        } else {
            Err(AuthError::Forbidden { role: self.role })
        }
    }
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}
