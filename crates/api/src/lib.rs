//! Verdant API - order-management service.
//!
//! Accepts proposed orders, validates them against the product catalog,
//! persists order + line items atomically, and serves role-scoped views of
//! orders. Products and accounts ride along as plain single-table CRUD.
//!
//! # Layering
//!
//! - [`routes`] - axum handlers; deserialize, delegate, serialize
//! - [`services`] - cross-entity logic (catalog validation, access policy,
//!   status lifecycle)
//! - [`db`] - repositories over `PgPool`; the only place SQL lives
//! - [`models`] - domain types shared by the layers above
//! - [`auth`] / [`policy`] - who is calling, and what they may see

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod state;
