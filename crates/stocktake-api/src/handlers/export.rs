//! Spreadsheet download.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use http::header;
use serde::Deserialize;
use stocktake_core::ProductFilter;
use stocktake_export::{CONTENT_TYPE_XLSX, export_filename, export_products};

use crate::extract::CurrentUser;
use crate::{ApiError, AppState};

/// Optional export body. An empty request body is the same as `{}`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// Restrict the export to one company.
    #[serde(default)]
    pub company: Option<String>,
}

impl ExportRequest {
    /// Parse a raw request body, treating whitespace-only as empty.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid export request: {e}")))
    }
}

/// `POST /api/export`
pub async fn export(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = ExportRequest::from_body(&body)?;
    let filter = ProductFilter::by_company(request.company.as_deref());
    let products = state.products.list(&filter).await?;

    let bytes = tokio::task::spawn_blocking(move || export_products(&products))
        .await
        .map_err(|e| ApiError::Internal(format!("export task failed: {e}")))??;

    let filename = export_filename(filter.company.as_deref(), Utc::now());
    tracing::info!(%filename, size = bytes.len(), by = %user.username, "Export generated");

    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE_XLSX.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
