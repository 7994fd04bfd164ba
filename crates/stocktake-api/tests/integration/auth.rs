//! Login, token verification and the auth layer.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use http::{Method, StatusCode};
use serde_json::json;
use stocktake_auth::TokenIssuer;
use stocktake_core::{NewUser, PublicUser, Role};
use stocktake_store::UserStore;

use crate::common::{PASSWORD, SECRET, TestApp};

#[tokio::test]
async fn test_login_returns_token_and_public_user() {
    let app = TestApp::new().await;
    let resp = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "clerk", "password": PASSWORD })),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "clerk");
    assert_eq!(body["user"]["name"], "Stock Clerk");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new().await;
    let wrong = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "clerk", "password": "nope" })),
        )
        .await;
    let unknown = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), unknown.message());
    assert_eq!(wrong.message(), "Invalid username or password");
}

#[tokio::test]
async fn test_login_with_non_bcrypt_stored_hash_is_401() {
    let app = TestApp::new().await;
    let legacy = NewUser::new("legacy", "Legacy", Role::User, "plaintext-password").unwrap();
    UserStore::insert(app.store.as_ref(), legacy).await.unwrap();

    for candidate in ["plaintext-password", PASSWORD] {
        let resp = app
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": "legacy", "password": candidate })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp.message(), "Invalid username or password");
    }
}

#[tokio::test]
async fn test_login_missing_fields_is_400() {
    let app = TestApp::new().await;
    for body in [
        json!({}),
        json!({ "username": "clerk" }),
        json!({ "username": "  ", "password": PASSWORD }),
    ] {
        let resp = app
            .request(Method::POST, "/api/auth/login", None, Some(body))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.message(), "Username and password are required");
    }
}

#[tokio::test]
async fn test_login_malformed_json_is_400() {
    let app = TestApp::new().await;
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"username\":"))
        .unwrap();
    let resp = app.send(req).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_echoes_claims() {
    let app = TestApp::new().await;
    let token = app.login("auditor").await;

    let resp = app
        .request(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["username"], "auditor");
    assert_eq!(body["user"]["role"], "viewer");
    let ttl = body["user"]["exp"].as_u64().unwrap() - body["user"]["iat"].as_u64().unwrap();
    assert_eq!(ttl, 24 * 3600);
}

#[tokio::test]
async fn test_missing_token_is_401_with_challenge() {
    let app = TestApp::new().await;
    let resp = app.request(Method::GET, "/api/products", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.message(), "Access token required");
    assert_eq!(
        resp.headers.get(http::header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = TestApp::new().await;
    let resp = app
        .request(Method::GET, "/api/auth/verify", Some("not.a.jwt"), None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.message(), "Invalid or expired token");
}

fn forged_user() -> PublicUser {
    PublicUser {
        id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
        username: "mallory".to_string(),
        name: "Mallory".to_string(),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_401() {
    let app = TestApp::new().await;
    let issuer = TokenIssuer::new(b"some-other-secret", "stocktake", Duration::from_secs(3600));
    let token = issuer.issue(&forged_user()).unwrap();

    let resp = app
        .request(Method::GET, "/api/products", Some(&token), None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = TestApp::new().await;
    let issuer = TokenIssuer::new(SECRET.as_bytes(), "stocktake", Duration::from_secs(3600));
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let token = issuer
        .issue_at(&forged_user(), now - 2 * 24 * 3600)
        .unwrap();

    let resp = app
        .request(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.message(), "Invalid or expired token");
}

#[tokio::test]
async fn test_wrong_issuer_is_401() {
    let app = TestApp::new().await;
    let issuer = TokenIssuer::new(SECRET.as_bytes(), "someone-else", Duration::from_secs(3600));
    let token = issuer.issue(&forged_user()).unwrap();

    let resp = app
        .request(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
