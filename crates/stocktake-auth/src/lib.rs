//! Authentication and authorization primitives for Stocktake.
//!
//! Provides:
//! - [`AuthenticatedUser`]: Identity extracted from a validated token
//! - [`TokenValidator`]: Trait for async token validation
//! - [`JwtValidator`] / [`TokenIssuer`]: HS256 tokens signed with a shared secret
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `TokenValidator`
//! - [`password`]: bcrypt hashing and verification
//! - [`AuthConfig`]: Configuration for the auth layer
//! - [`AuthError`]: Auth-specific error types

mod error;
mod jwt;
mod middleware;
pub mod password;
mod user;

pub use error::AuthError;
pub use jwt::{Claims, JwtValidator, TokenIssuer};
pub use middleware::{AuthLayer, AuthService};
pub use user::{AuthenticatedUser, user_from_parts};

use stocktake_core::config::AuthSettings;

/// Configuration for the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Required `iss` claim.
    pub issuer: String,
    /// Clock skew tolerated when checking `exp`, in seconds.
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: AuthSettings::default().issuer,
            leeway_secs: 60,
        }
    }
}

impl From<&AuthSettings> for AuthConfig {
    fn from(settings: &AuthSettings) -> Self {
        Self {
            issuer: settings.issuer.clone(),
            ..Default::default()
        }
    }
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and returns
/// the authenticated user on success.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}
