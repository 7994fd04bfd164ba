//! Request handlers, one module per resource.

pub mod auth;
pub mod export;
pub mod health;
pub mod products;

use axum::response::IntoResponse;

use crate::ApiError;

/// JSON 404 for unmatched `/api` paths.
pub async fn api_not_found() -> impl IntoResponse {
    ApiError::NotFound("Route not found")
}
