//! Spreadsheet export endpoint.

use std::io::{Cursor, Read};

use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::json;
use stocktake_export::CONTENT_TYPE_XLSX;

use crate::common::TestApp;

fn shared_strings(xlsx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).unwrap();
    let mut file = archive.by_name("xl/sharedStrings.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn disposition(headers: &http::HeaderMap) -> String {
    headers
        .get(http::header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_export_all_with_empty_body() {
    let app = TestApp::new().await;
    app.seed_product("Bolt", "Acme", 100).await;
    app.seed_product("Nut", "Globex", 50).await;
    let token = app.login("auditor").await;

    let resp = app
        .request(Method::POST, "/api/export", Some(&token), None)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.headers.get(http::header::CONTENT_TYPE).unwrap(),
        CONTENT_TYPE_XLSX
    );
    let disposition = disposition(&resp.headers);
    assert!(disposition.starts_with("attachment; filename=inventory_all_"));
    assert!(disposition.ends_with(".xlsx"));

    assert_eq!(&resp.body[..2], b"PK");
    let strings = shared_strings(&resp.body);
    assert!(strings.contains("Bolt"));
    assert!(strings.contains("Globex"));
}

#[tokio::test]
async fn test_export_by_company() {
    let app = TestApp::new().await;
    app.seed_product("Bolt", "Acme", 100).await;
    app.seed_product("Nut", "Globex", 50).await;
    let token = app.login("clerk").await;

    let resp = app
        .request(
            Method::POST,
            "/api/export",
            Some(&token),
            Some(json!({ "company": "Acme" })),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(disposition(&resp.headers).starts_with("attachment; filename=inventory_Acme_"));
    let strings = shared_strings(&resp.body);
    assert!(strings.contains("Bolt"));
    assert!(!strings.contains("Globex"));
}

#[tokio::test]
async fn test_export_blank_company_means_all() {
    let app = TestApp::new().await;
    app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("clerk").await;

    let resp = app
        .request(
            Method::POST,
            "/api/export",
            Some(&token),
            Some(json!({ "company": "" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(disposition(&resp.headers).contains("inventory_all_"));
}

#[tokio::test]
async fn test_export_of_empty_inventory_still_has_header_row() {
    let app = TestApp::new().await;
    let token = app.login("admin").await;

    let resp = app
        .request(Method::POST, "/api/export", Some(&token), Some(json!({})))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(shared_strings(&resp.body).contains("Product Name"));
}

#[tokio::test]
async fn test_export_rejects_malformed_body() {
    let app = TestApp::new().await;
    let token = app.login("admin").await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/export")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("{company"))
        .unwrap();

    let resp = app.send(req).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_requires_token() {
    let app = TestApp::new().await;
    let resp = app.request(Method::POST, "/api/export", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
