//! Product CRUD.
//!
//! Reads are open to every authenticated role; writes take an [`Editor`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use http::StatusCode;
use serde::Deserialize;
use stocktake_core::{Product, ProductFilter, ProductId, ProductInput, QuantityUpdate};

use crate::extract::{CurrentUser, Editor, JsonBody};
use crate::{ApiError, AppState};

const NOT_FOUND: &str = "Product not found";

/// Query string for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only products from this company.
    pub company: Option<String>,
}

/// `GET /api/products`
pub async fn list(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let filter = ProductFilter::by_company(query.company.as_deref());
    Ok(Json(state.products.list(&filter).await?))
}

/// `GET /api/products/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get(&ProductId::new(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// `POST /api/products`
pub async fn create(
    State(state): State<Arc<AppState>>,
    Editor(user): Editor,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let fields = input.validate()?;
    let product = state.products.insert(fields).await?;
    tracing::info!(id = %product.id, by = %user.username, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Editor(user): Editor,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let fields = input.validate()?;
    let product = state
        .products
        .replace(&ProductId::new(id), fields)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    tracing::info!(id = %product.id, by = %user.username, "Product updated");
    Ok(Json(product))
}

/// `PATCH /api/products/{id}/quantity`
pub async fn update_quantity(
    State(state): State<Arc<AppState>>,
    Editor(user): Editor,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<QuantityUpdate>,
) -> Result<Json<Product>, ApiError> {
    let quantity = update.validate()?;
    let product = state
        .products
        .set_quantity(&ProductId::new(id), quantity)
        .await?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    tracing::info!(id = %product.id, quantity, by = %user.username, "Quantity updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Editor(user): Editor,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ProductId::new(id);
    if !state.products.delete(&id).await? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    tracing::info!(%id, by = %user.username, "Product deleted");
    Ok(Json(
        serde_json::json!({ "message": "Product deleted successfully" }),
    ))
}
