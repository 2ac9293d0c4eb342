//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database)
//!
//! # Auth
//! POST /auth/register       - Create an account (role is always "user")
//! POST /auth/login          - Verify credentials, issue a bearer token
//!
//! # Products
//! GET    /products          - List the catalog
//! GET    /products/{id}     - Product detail
//! POST   /products          - Create (seller/admin)
//! PUT    /products/{id}     - Partial update (seller/admin)
//! DELETE /products/{id}     - Delete (seller/admin)
//!
//! # Orders (all require auth)
//! POST /orders              - Create an order with line items
//! GET  /orders              - List orders, scoped by role
//! GET  /orders/{id}         - Order merged with its items
//! PUT  /orders/{id}         - Update the order status
//! ```

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show).put(orders::update))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}
