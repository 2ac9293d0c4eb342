//! Integration tests for the product and auth endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (verdant-cli seed products)
//! - The API server running with default configuration
//!
//! Run with: cargo test -p verdant-integration-tests -- --ignored

use serde_json::{Value, json};
use uuid::Uuid;

use verdant_integration_tests::TestContext;

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_catalog_is_public() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(format!("{}/products", ctx.base_url))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), 200);

    let products: Vec<Value> = resp.json().await.expect("products response not JSON");
    assert!(!products.is_empty());

    let id = products[0]["id"].as_i64().expect("product id missing");
    let resp = ctx
        .client
        .get(format!("{}/products/{id}", ctx.base_url))
        .send()
        .await
        .expect("product request failed");
    assert_eq!(resp.status(), 200);

    let product: Value = resp.json().await.expect("product response not JSON");
    assert!(product["name"].as_str().is_some());
    assert!(product["price"].as_f64().is_some());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_unknown_product_is_404() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(format!("{}/products/{}", ctx.base_url, 9_999_999))
        .send()
        .await
        .expect("product request failed");

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_catalog_writes_denied_for_plain_users() {
    let ctx = TestContext::new();
    let user = ctx.register_and_login().await;

    let payload = json!({ "name": "Sneaky product", "price": 1.0 });

    // Unauthenticated: 401.
    let resp = ctx
        .client
        .post(format!("{}/products", ctx.base_url))
        .json(&payload)
        .send()
        .await
        .expect("create product request failed");
    assert_eq!(resp.status(), 401);

    // Authenticated but not seller/admin: 403.
    let resp = ctx
        .client
        .post(format!("{}/products", ctx.base_url))
        .bearer_auth(&user.token)
        .json(&payload)
        .send()
        .await
        .expect("create product request failed");
    assert_eq!(resp.status(), 403);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and migrated database"]
async fn test_register_rejects_bad_input() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(format!("{}/auth/register", ctx.base_url))
        .json(&json!({ "email": "not-an-email", "password": "long enough" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 400);

    let resp = ctx
        .client
        .post(format!("{}/auth/register", ctx.base_url))
        .json(&json!({ "email": "short@test.example", "password": "abc" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running API server and migrated database"]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new();
    let email = format!("dup-{}@test.example", Uuid::new_v4());
    let payload = json!({ "email": email, "password": "integration-test-password" });

    let resp = ctx
        .client
        .post(format!("{}/auth/register", ctx.base_url))
        .json(&payload)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201);

    let resp = ctx
        .client
        .post(format!("{}/auth/register", ctx.base_url))
        .json(&payload)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
#[ignore = "Requires running API server and migrated database"]
async fn test_login_with_wrong_password_is_401() {
    let ctx = TestContext::new();
    let email = format!("pw-{}@test.example", Uuid::new_v4());

    let resp = ctx
        .client
        .post(format!("{}/auth/register", ctx.base_url))
        .json(&json!({ "email": email, "password": "integration-test-password" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201);

    let resp = ctx
        .client
        .post(format!("{}/auth/login", ctx.base_url))
        .json(&json!({ "email": email, "password": "wrong password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 401);

    // Successful login must not echo credential material.
    let resp = ctx
        .client
        .post(format!("{}/auth/login", ctx.base_url))
        .json(&json!({ "email": email, "password": "integration-test-password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("login response not JSON");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}
