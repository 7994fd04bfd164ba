//! Request extractors.
//!
//! - [`CurrentUser`]: the identity the auth middleware attached
//! - [`Editor`]: like `CurrentUser`, but rejects read-only roles with 403
//! - [`JsonBody`]: `Json` whose rejection is an [`ApiError`] (JSON body, 400)

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use http::request::Parts;
use stocktake_auth::{AuthError, AuthenticatedUser, user_from_parts};

use crate::ApiError;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_parts(parts)
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Auth(AuthError::MissingToken))
    }
}

/// An authenticated caller whose role may modify inventory.
#[derive(Debug, Clone)]
pub struct Editor(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for Editor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        user.require_modify()?;
        Ok(Editor(user))
    }
}

/// JSON body extractor with API-shaped rejections.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
