//! HS256 session tokens.
//!
//! [`TokenIssuer`] signs a token after a successful login; [`JwtValidator`]
//! implements [`TokenValidator`] for the middleware. Both share one secret.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use stocktake_core::{PublicUser, Role};

use crate::{AuthConfig, AuthError, AuthenticatedUser, TokenValidator};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User store id.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Role at issue time.
    pub role: Role,
    /// Issuer.
    pub iss: String,
    /// Issued-at (seconds since epoch).
    pub iat: u64,
    /// Expiry (seconds since epoch).
    pub exp: u64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            role: claims.role,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

/// Signs session tokens.
pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer for the given secret, `iss` value, and lifetime.
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue(&self, user: &PublicUser) -> Result<String, AuthError> {
        self.issue_at(user, get_current_timestamp())
    }

    /// Issue a token for `user` as if the current time were `now`.
    pub fn issue_at(&self, user: &PublicUser, now: u64) -> Result<String, AuthError> {
        let claims = Claims {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl.as_secs()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

/// Validates HS256 session tokens.
pub struct JwtValidator {
    key: DecodingKey,
}

impl JwtValidator {
    /// Create a validator for tokens signed with `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
        }
    }

    /// Decode and check a token.
    pub fn validate_token(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.leeway = config.leeway_secs;

        let token_data = decode::<Claims>(token, &self.key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::InvalidFormat(e.to_string()),
                _ => AuthError::InvalidSignature(e.to_string()),
            }
        })?;

        Ok(token_data.claims.into())
    }
}

impl TokenValidator for JwtValidator {
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let result = self.validate_token(token, config);
        Box::pin(async move { result })
    }
}
