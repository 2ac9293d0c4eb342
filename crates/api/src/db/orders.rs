//! Order repository for database operations.
//!
//! The order insert and the line-item batch insert always share one
//! transaction: an order with zero items must never become visible to
//! readers, no matter which statement fails.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};

use verdant_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::{NewOrderItem, Order, OrderItem, OrderWithItems};

/// Internal row type for `orders` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    created_at: DateTime<Utc>,
    status: String,
    user_id: i32,
    payment_ref: Option<String>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid status in database: {}", row.status))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            created_at: row.created_at,
            status,
            user_id: UserId::new(row.user_id),
            payment_ref: row.payment_ref,
        })
    }
}

/// Internal row type for `order_items` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            price: row.price,
        }
    }
}

/// Internal row type for the order/items LEFT JOIN. Item columns are
/// nullable because an order with no items still yields one joined row.
#[derive(Debug, sqlx::FromRow)]
struct OrderJoinRow {
    id: i32,
    created_at: DateTime<Utc>,
    status: String,
    user_id: i32,
    payment_ref: Option<String>,
    item_id: Option<i32>,
    product_id: Option<i32>,
    quantity: Option<i32>,
    price: Option<Decimal>,
}

impl OrderJoinRow {
    /// The line item carried by this joined row, if any.
    ///
    /// All four item columns are NULL together (no items joined) or none
    /// are; a mix means the join query and this type disagree.
    fn item(&self) -> Result<Option<OrderItem>, RepositoryError> {
        match (self.item_id, self.product_id, self.quantity, self.price) {
            (Some(id), Some(product_id), Some(quantity), Some(price)) => Ok(Some(OrderItem {
                id: OrderItemId::new(id),
                order_id: OrderId::new(self.id),
                product_id: ProductId::new(product_id),
                quantity,
                price,
            })),
            (None, None, None, None) => Ok(None),
            _ => Err(RepositoryError::DataCorruption(
                "order item join produced a partial row".to_owned(),
            )),
        }
    }
}

/// Merge the joined rows of a single order into the order plus its items.
///
/// The order's scalar fields repeat on every joined row and are taken from
/// the first one; rows whose item columns are NULL (the zero-item shell)
/// contribute no item. An empty input means the order does not exist -
/// returning `None` is what lets the caller answer not-found instead of
/// tripping over an empty result set.
fn merge_order_rows(rows: Vec<OrderJoinRow>) -> Result<Option<OrderWithItems>, RepositoryError> {
    let mut merged: Option<OrderWithItems> = None;

    for row in rows {
        let item = row.item()?;
        match merged.as_mut() {
            None => {
                let order = Order::try_from(OrderRow {
                    id: row.id,
                    created_at: row.created_at,
                    status: row.status,
                    user_id: row.user_id,
                    payment_ref: row.payment_ref,
                })?;
                merged = Some(OrderWithItems {
                    order,
                    items: item.into_iter().collect(),
                });
            }
            Some(existing) => {
                if let Some(item) = item {
                    existing.items.push(item);
                }
            }
        }
    }

    Ok(merged)
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Atomically create an order for `buyer` together with its line items.
    ///
    /// Inserts the order row first (the items need its generated ID), then
    /// all item rows in one batch statement, inside a single transaction.
    /// If the item insert fails the order insert rolls back with it.
    ///
    /// The caller is responsible for validation; this method persists
    /// whatever quantities and prices it is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; no
    /// partial order remains in that case.
    pub async fn create_with_items(
        &self,
        buyer: UserId,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id)
            VALUES ($1)
            RETURNING id, created_at, status, user_id, payment_ref
            ",
        )
        .bind(buyer)
        .fetch_one(&mut *tx)
        .await?;

        let mut builder: QueryBuilder<'_, sqlx::Postgres> =
            QueryBuilder::new("INSERT INTO order_items (order_id, product_id, quantity, price) ");
        builder.push_values(items, |mut b, item| {
            b.push_bind(order_row.id)
                .push_bind(item.product_id)
                .push_bind(item.quantity)
                .push_bind(item.price);
        });
        builder.push(" RETURNING id, order_id, product_id, quantity, price");

        let item_rows: Vec<OrderItemRow> = builder
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderWithItems {
            order: order_row.try_into()?,
            items: item_rows.into_iter().map(Into::into).collect(),
        })
    }

    /// Get an order without its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is
    /// not a known lifecycle state.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, created_at, status, user_id, payment_ref FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Get an order merged with its line items.
    ///
    /// Uses a LEFT JOIN so an order that somehow has zero items still comes
    /// back as a shell with an empty item list rather than disappearing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` on malformed stored data.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderJoinRow>(
            r"
            SELECT o.id, o.created_at, o.status, o.user_id, o.payment_ref,
                   i.id AS item_id, i.product_id, i.quantity, i.price
            FROM orders o
            LEFT JOIN order_items i ON i.order_id = o.id
            WHERE o.id = $1
            ORDER BY i.id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        merge_order_rows(rows)
    }

    /// List every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, created_at, status, user_id, payment_ref FROM orders ORDER BY id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// List the orders owned by one buyer, newest first. The scoping lives
    /// in the query predicate, not in post-filtering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_owned_by(&self, owner: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, created_at, status, user_id, payment_ref
            FROM orders
            WHERE user_id = $1
            ORDER BY id DESC
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Move an order to `next` only if it is still in `current`.
    ///
    /// The compare-and-set guard means a concurrent update between the
    /// caller's read and this write leaves the row untouched and returns
    /// `None` instead of silently overwriting the newer state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_status_if(
        &self,
        id: OrderId,
        current: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING id, created_at, status, user_id, payment_ref
            ",
        )
        .bind(id)
        .bind(current.as_str())
        .bind(next.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
