//! End-to-end tests for the Verdant Market API.
//!
//! # Running Tests
//!
//! The tests in `tests/` drive a live server over HTTP, so they are
//! `#[ignore]`d by default. To run them:
//!
//! ```bash
//! # 1. Start PostgreSQL and prepare the database
//! cargo run -p verdant-cli -- migrate
//! cargo run -p verdant-cli -- seed products
//!
//! # 2. Start the API (default config)
//! cargo run -p verdant-api
//!
//! # 3. Run the ignored tests
//! cargo test -p verdant-integration-tests -- --ignored
//! ```
//!
//! The ownership tests assume the default `API_ENFORCE_ORDER_OWNERSHIP=true`.

use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// An authenticated caller created for one test.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Shared context for one test: an HTTP client and the server address.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Create a context pointing at the configured server.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url(),
        }
    }

    /// Register a fresh account and log it in.
    ///
    /// Each call uses a unique email so tests never collide across runs.
    ///
    /// # Panics
    ///
    /// Panics if registration or login fails; the server must be running
    /// with a migrated database.
    pub async fn register_and_login(&self) -> TestUser {
        let email = format!("it-{}@test.example", Uuid::new_v4());
        let password = "integration-test-password";

        let resp = self
            .client
            .post(format!("{}/auth/register", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(resp.status(), 201, "registration should succeed");

        let resp = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(resp.status(), 200, "login should succeed");

        let body: Value = resp.json().await.expect("login response not JSON");
        let token = body["token"].as_str().expect("token missing").to_owned();
        let id = body["user"]["id"].as_i64().expect("user id missing");

        TestUser { id, token }
    }

    /// Fetch the catalog and return the IDs of the first two products.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has fewer than two products; run
    /// `verdant-cli seed products` first.
    pub async fn two_product_ids(&self) -> (i64, i64) {
        let resp = self
            .client
            .get(format!("{}/products", self.base_url))
            .send()
            .await
            .expect("products request failed");
        assert_eq!(resp.status(), 200);

        let products: Vec<Value> = resp.json().await.expect("products response not JSON");
        assert!(
            products.len() >= 2,
            "catalog needs at least two products (run: verdant-cli seed products)"
        );

        let first = products[0]["id"].as_i64().expect("product id missing");
        let second = products[1]["id"].as_i64().expect("product id missing");
        (first, second)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
