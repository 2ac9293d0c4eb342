//! Product catalog domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use verdant_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional image reference.
    pub image: Option<String>,
    /// Current catalog price. Orders capture their own copy of this at
    /// creation time, so editing it never rewrites order history.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Partial update for a product; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}
