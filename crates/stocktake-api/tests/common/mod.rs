//! Common test utilities and harness for stocktake-api integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::Value;
use stocktake_api::{AppState, build_router};
use stocktake_auth::password;
use stocktake_core::{NewUser, ProductInput, Role, StocktakeConfig};
use stocktake_store::{MemoryStore, ProductStore, UserStore};
use tower::ServiceExt;

/// Secret shared by the test app and any tokens forged in tests.
pub const SECRET: &str = "integration-test-secret";

/// Password of every seeded account.
pub const PASSWORD: &str = "correct horse";

/// Test harness: a router over a fresh in-memory store with one account per role.
pub struct TestApp {
    /// The application under test.
    pub router: Router,
    /// Direct store access for setup and assertions.
    pub store: Arc<MemoryStore>,
}

/// A response with its body collected.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: http::HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// The `message` field of a JSON error body.
    pub fn message(&self) -> String {
        self.json()["message"].as_str().unwrap().to_string()
    }
}

impl TestApp {
    /// Creates an app seeded with `admin`, `clerk` (user) and `auditor` (viewer).
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Creates an app with a custom config; the secret is forced to [`SECRET`].
    pub async fn with_config(mut config: StocktakeConfig) -> Self {
        config.auth.jwt_secret = SECRET.to_string();
        let store = Arc::new(MemoryStore::new());

        for (username, name, role) in [
            ("admin", "Admin", Role::Admin),
            ("clerk", "Stock Clerk", Role::User),
            ("auditor", "Auditor", Role::Viewer),
        ] {
            let hash = password::hash_password(PASSWORD, 4).unwrap();
            let user = NewUser::new(username, name, role, hash).unwrap();
            UserStore::insert(store.as_ref(), user).await.unwrap();
        }

        let state = AppState::new(config, store.clone(), store.clone()).unwrap();
        Self {
            router: build_router(state),
            store,
        }
    }

    /// Sends a request and collects the response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Sends a prepared request and collects the response.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Logs in and returns the token.
    pub async fn login(&self, username: &str) -> String {
        let resp = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login as {username} failed");
        resp.json()["token"].as_str().unwrap().to_string()
    }

    /// Inserts a product directly into the store and returns its id.
    pub async fn seed_product(&self, name: &str, company: &str, quantity: i64) -> String {
        let input: ProductInput = serde_json::from_value(serde_json::json!({
            "name": name,
            "quantity": quantity,
            "price": 9.5,
            "company": company,
            "type": "Hardware",
        }))
        .unwrap();
        let product = ProductStore::insert(self.store.as_ref(), input.validate().unwrap())
            .await
            .unwrap();
        product.id.to_string()
    }
}

/// Default config for tests.
pub fn test_config() -> StocktakeConfig {
    StocktakeConfig::default()
}

/// A valid create/replace payload.
pub fn product_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "quantity": 12,
        "price": 3.25,
        "company": "Acme",
        "type": "Tools",
        "description": "Steel",
    })
}
