//! Product CRUD through the HTTP surface.

use http::{Method, StatusCode};
use serde_json::json;

use crate::common::{TestApp, product_body};

const UNKNOWN_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

#[tokio::test]
async fn test_create_then_fetch() {
    let app = TestApp::new().await;
    let token = app.login("clerk").await;

    let created = app
        .request(
            Method::POST,
            "/api/products",
            Some(&token),
            Some(product_body("Hammer")),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let product = created.json();
    let id = product["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert_eq!(product["name"], "Hammer");
    assert_eq!(product["type"], "Tools");
    assert!(product["createdAt"].is_string());
    assert!(product["updatedAt"].is_string());

    let fetched = app
        .request(
            Method::GET,
            &format!("/api/products/{id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), product);
}

#[tokio::test]
async fn test_list_and_company_filter() {
    let app = TestApp::new().await;
    app.seed_product("Bolt", "Acme", 100).await;
    app.seed_product("Nut", "Globex", 50).await;
    app.seed_product("Washer", "Acme", 25).await;
    let token = app.login("auditor").await;

    let all = app
        .request(Method::GET, "/api/products", Some(&token), None)
        .await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<String> = all
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Bolt", "Nut", "Washer"]);

    let acme = app
        .request(Method::GET, "/api/products?company=Acme", Some(&token), None)
        .await;
    assert_eq!(acme.json().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_404() {
    let app = TestApp::new().await;
    let token = app.login("admin").await;

    for id in [UNKNOWN_ID, "not-an-id"] {
        let resp = app
            .request(
                Method::GET,
                &format!("/api/products/{id}"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.message(), "Product not found");
    }

    let replace = app
        .request(
            Method::PUT,
            &format!("/api/products/{UNKNOWN_ID}"),
            Some(&token),
            Some(product_body("Ghost")),
        )
        .await;
    assert_eq!(replace.status, StatusCode::NOT_FOUND);

    let quantity = app
        .request(
            Method::PATCH,
            &format!("/api/products/{UNKNOWN_ID}/quantity"),
            Some(&token),
            Some(json!({ "quantity": 1 })),
        )
        .await;
    assert_eq!(quantity.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(
            Method::DELETE,
            &format!("/api/products/{UNKNOWN_ID}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_failures_are_400() {
    let app = TestApp::new().await;
    let token = app.login("clerk").await;

    let cases = [
        (json!({ "quantity": 1, "price": 1, "company": "A", "type": "T" }), "name is required"),
        (json!({ "name": "X", "quantity": -1, "price": 1, "company": "A", "type": "T" }), "quantity must not be negative"),
        (json!({ "name": "X", "quantity": 1, "price": -0.5, "company": "A", "type": "T" }), "price must not be negative"),
        (json!({ "name": "X", "quantity": 1, "price": 1, "company": " ", "type": "T" }), "company is required"),
    ];
    for (body, message) in cases {
        let resp = app
            .request(Method::POST, "/api/products", Some(&token), Some(body))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.message(), message);
    }
    assert!(
        app.request(Method::GET, "/api/products", Some(&token), None)
            .await
            .json()
            .as_array()
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let app = TestApp::new().await;
    let token = app.login("clerk").await;
    let resp = app
        .request(
            Method::POST,
            "/api/products",
            Some(&token),
            Some(json!({
                "name": "Saw",
                "quantity": "7",
                "price": "12.50",
                "company": "Acme",
                "type": "Tools",
            })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let product = resp.json();
    assert_eq!(product["quantity"], 7);
    assert_eq!(product["price"], 12.5);
    assert_eq!(product["description"], "");
}

#[tokio::test]
async fn test_replace_keeps_id_and_created_at() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("admin").await;
    let before = app
        .request(Method::GET, &format!("/api/products/{id}"), Some(&token), None)
        .await
        .json();

    let resp = app
        .request(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(&token),
            Some(product_body("Hex Bolt")),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let after = resp.json();
    assert_eq!(after["_id"], before["_id"]);
    assert_eq!(after["createdAt"], before["createdAt"]);
    assert_eq!(after["name"], "Hex Bolt");
    assert_eq!(after["quantity"], 12);
}

#[tokio::test]
async fn test_update_quantity_only() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("clerk").await;

    let resp = app
        .request(
            Method::PATCH,
            &format!("/api/products/{id}/quantity"),
            Some(&token),
            Some(json!({ "quantity": 0 })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let product = resp.json();
    assert_eq!(product["quantity"], 0);
    assert_eq!(product["name"], "Bolt");

    let whole = app
        .request(
            Method::PATCH,
            &format!("/api/products/{id}/quantity"),
            Some(&token),
            Some(json!({ "quantity": "3.0" })),
        )
        .await;
    assert_eq!(whole.status, StatusCode::OK);
    assert_eq!(whole.json()["quantity"], 3);

    let missing = app
        .request(
            Method::PATCH,
            &format!("/api/products/{id}/quantity"),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_validation_failures_leave_product_unchanged() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("admin").await;
    let uri = format!("/api/products/{id}");
    let before = app
        .request(Method::GET, &uri, Some(&token), None)
        .await
        .json();

    let cases = [
        (json!({ "quantity": 1, "price": 1, "company": "A", "type": "T" }), "name is required"),
        (json!({ "name": "X", "quantity": 1, "price": 1, "company": "A", "type": "  " }), "type is required"),
        (json!({ "name": "X", "quantity": "lots", "price": 1, "company": "A", "type": "T" }), "quantity must be a whole number"),
    ];
    for (body, message) in cases {
        let resp = app
            .request(Method::PUT, &uri, Some(&token), Some(body))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.message(), message);
    }

    let after = app
        .request(Method::GET, &uri, Some(&token), None)
        .await
        .json();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_update_quantity_rejects_negative_and_fractional() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("clerk").await;
    let uri = format!("/api/products/{id}/quantity");

    for (quantity, message) in [
        (json!(-3), "quantity must not be negative"),
        (json!("-1"), "quantity must not be negative"),
        (json!(2.5), "quantity must be a whole number"),
        (json!("2.5"), "quantity must be a whole number"),
    ] {
        let resp = app
            .request(
                Method::PATCH,
                &uri,
                Some(&token),
                Some(json!({ "quantity": quantity })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.message(), message);
    }

    let product = app
        .request(Method::GET, &format!("/api/products/{id}"), Some(&token), None)
        .await
        .json();
    assert_eq!(product["quantity"], 100);
}

#[tokio::test]
async fn test_delete_then_gone() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("clerk").await;

    let resp = app
        .request(Method::DELETE, &format!("/api/products/{id}"), Some(&token), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.message(), "Product deleted successfully");

    let again = app
        .request(Method::DELETE, &format!("/api/products/{id}"), Some(&token), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_viewer_cannot_modify() {
    let app = TestApp::new().await;
    let id = app.seed_product("Bolt", "Acme", 100).await;
    let token = app.login("auditor").await;

    let attempts = [
        (Method::POST, "/api/products".to_string(), Some(product_body("X"))),
        (Method::PUT, format!("/api/products/{id}"), Some(product_body("X"))),
        (
            Method::PATCH,
            format!("/api/products/{id}/quantity"),
            Some(json!({ "quantity": 1 })),
        ),
        (Method::DELETE, format!("/api/products/{id}"), None),
    ];
    for (method, uri, body) in attempts {
        let resp = app.request(method, &uri, Some(&token), body).await;
        assert_eq!(resp.status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(resp.message(), "Insufficient permissions");
    }

    let product = app
        .request(Method::GET, &format!("/api/products/{id}"), Some(&token), None)
        .await
        .json();
    assert_eq!(product["name"], "Bolt");
    assert_eq!(product["quantity"], 100);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = TestApp::new().await;
    let resp = app.request(Method::GET, "/api/nothing/here", None, None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Route not found");
}
