//! Verdant Core - Shared types library.
//!
//! This crate provides the domain types used across all Verdant Market
//! components:
//! - `api` - The order-management HTTP service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, caller roles, and the order status
//!   state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
