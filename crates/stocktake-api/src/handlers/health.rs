//! Liveness probe.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "stocktake";

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Store backend and whether it answered, e.g. `mongodb: connected`.
    pub database: String,
}

/// `GET /api/health`
///
/// Always 200 while the process is serving; store reachability is reported
/// in `database`.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = state.products.backend_name();
    let database = match state.products.ping().await {
        Ok(()) => format!("{backend}: connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store unreachable");
            format!("{backend}: unreachable")
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
