//! Login and token verification.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use stocktake_auth::{AuthError, AuthenticatedUser, password};
use stocktake_core::PublicUser;

use crate::extract::{CurrentUser, JsonBody};
use crate::{ApiError, AppState};

/// Login payload.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    #[serde(default)]
    pub username: Option<String>,
    /// Plain-text password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// The logged-in account.
    pub user: PublicUser,
}

/// Result of `GET /api/auth/verify`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Always `true`; invalid tokens never reach the handler.
    pub valid: bool,
    /// Claims carried by the token.
    pub user: AuthenticatedUser,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(candidate)) = (non_blank(body.username), non_blank(body.password))
    else {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };
    let username = username.trim();

    let Some(user) = state.users.find_by_username(username).await? else {
        tracing::info!(username, "Login failed: unknown user");
        return Err(AuthError::InvalidCredentials.into());
    };

    let matches = match password::verify_password_async(candidate, user.password_hash.clone())
        .await
    {
        Ok(matches) => matches,
        Err(AuthError::Hashing(reason)) => {
            tracing::warn!(username, %reason, "Stored password hash is not valid bcrypt");
            false
        }
        Err(e) => return Err(e.into()),
    };
    if !matches {
        tracing::info!(username, "Login failed: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let public = PublicUser::from(&user);
    let token = state.issuer.issue(&public)?;
    tracing::info!(username, role = %public.role, "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: public,
    }))
}

/// `GET /api/auth/verify`
pub async fn verify(CurrentUser(user): CurrentUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true, user })
}
