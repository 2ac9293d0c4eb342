//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use verdant_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A persisted purchase request, without its line items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// The buyer who owns this order. Set once at creation, never
    /// reassigned.
    pub user_id: UserId,
    /// External payment reference, if a payment flow has attached one.
    pub payment_ref: Option<String>,
}

/// A line item belonging to exactly one order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique line-item ID.
    pub id: OrderItemId,
    /// The owning order.
    pub order_id: OrderId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Units ordered; always positive.
    pub quantity: i32,
    /// Unit price captured at order time. Later catalog price changes
    /// never alter it.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// An order merged with its line items - the shape both the create and
/// single-read responses use.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// A requested line item, as submitted by the buyer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}
