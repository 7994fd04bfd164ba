//! Router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{any, get, patch, post};
use http::{HeaderValue, Method, header};
use stocktake_auth::AuthLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::{self, auth, export, health, products};

/// Build the full application router.
///
/// Everything except login and health sits behind the bearer-token layer.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get)
                .put(products::replace)
                .delete(products::delete),
        )
        .route(
            "/api/products/{id}/quantity",
            patch(products::update_quantity),
        )
        .route("/api/export", post(export::export))
        .route_layer(AuthLayer::new(state.validator.clone(), state.auth.clone()));

    let public = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/health", get(health::health))
        .route("/api/{*rest}", any(handlers::api_not_found));

    let router = public.merge(protected);
    let router = match &state.config.server.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving static frontend");
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(handlers::api_not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.server.cors_origins))
        .with_state(state)
}

/// CORS policy. An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(60 * 60));

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
