//! Order service - validation, persistence and policy for orders.
//!
//! This is the one place in the system with cross-entity logic: order
//! requests are validated against the product catalog before anything is
//! written, reads are filtered by the access policy, and status updates go
//! through the lifecycle state machine.

use std::collections::HashSet;

use rust_decimal::Decimal;
use sqlx::PgPool;

use verdant_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::auth::CurrentUser;
use crate::db::{OrderRepository, ProductRepository};
use crate::error::ApiError;
use crate::models::{NewOrderItem, Order, OrderWithItems};
use crate::policy::{AccessPolicy, OrderVisibility};

/// Orchestrates order creation, retrieval and updates.
pub struct OrderService<'a> {
    pool: &'a PgPool,
    policy: AccessPolicy,
}

impl<'a> OrderService<'a> {
    /// Create an order service over the shared pool and policy.
    #[must_use]
    pub const fn new(pool: &'a PgPool, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    /// Validate and atomically persist a new order for `buyer`.
    ///
    /// Validation runs entirely before the write, in this order: the item
    /// list must be non-empty; every distinct referenced product must
    /// exist in the catalog; every quantity must be positive and every
    /// price non-negative. Any failure is a client error and leaves the
    /// store untouched.
    ///
    /// Prices are persisted exactly as submitted - re-pricing from the
    /// live catalog is out of scope, and catalog changes after the fact
    /// never alter the captured values.
    ///
    /// Creation is intentionally not idempotent: submitting the same
    /// payload twice produces two orders.
    ///
    /// # Errors
    ///
    /// Returns a validation error, [`ApiError::UnknownProducts`], or a
    /// repository error on store failure (in which case the transaction
    /// has rolled back and no partial order exists).
    pub async fn create(
        &self,
        buyer: UserId,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems, ApiError> {
        if items.is_empty() {
            return Err(ApiError::Validation(
                "order must contain at least one item".to_owned(),
            ));
        }

        let wanted = distinct_product_ids(items);
        let existing = ProductRepository::new(self.pool)
            .existing_ids(&wanted)
            .await?;
        if existing.len() != wanted.len() {
            tracing::debug!(
                missing = wanted.difference(&existing).count(),
                "order rejected: unknown product references"
            );
            return Err(ApiError::UnknownProducts);
        }

        check_item_values(items)?;

        let created = OrderRepository::new(self.pool)
            .create_with_items(buyer, items)
            .await?;

        tracing::info!(
            order_id = %created.order.id,
            buyer = %buyer,
            items = created.items.len(),
            "order created"
        );

        Ok(created)
    }

    /// Fetch a single order with its items, subject to the access policy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id (decided before any merge),
    /// `Forbidden` when the policy denies the caller, or a repository
    /// error on store failure.
    pub async fn get(
        &self,
        caller: &CurrentUser,
        id: OrderId,
    ) -> Result<OrderWithItems, ApiError> {
        let found = OrderRepository::new(self.pool)
            .get_with_items(id)
            .await?
            .ok_or(ApiError::NotFound("order"))?;

        if !self.policy.can_view_order(caller, found.order.user_id) {
            return Err(ApiError::Forbidden);
        }

        Ok(found)
    }

    /// List orders visible to the caller.
    ///
    /// The role decides the scope; for plain users the owner filter is
    /// part of the query itself.
    ///
    /// # Errors
    ///
    /// Returns a repository error on store failure.
    pub async fn list(&self, caller: &CurrentUser) -> Result<Vec<Order>, ApiError> {
        let repo = OrderRepository::new(self.pool);

        let orders = match self.policy.list_visibility(caller) {
            OrderVisibility::All => repo.list_all().await?,
            OrderVisibility::OwnedBy(owner) => repo.list_owned_by(owner).await?,
        };

        Ok(orders)
    }

    /// Move an order to a new lifecycle state.
    ///
    /// The transition table is consulted against the current stored
    /// status; the write itself is a compare-and-set so a concurrent
    /// update cannot sneak a forbidden transition through between check
    /// and write.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `Forbidden` when the policy
    /// denies the caller, `InvalidTransition` when the lifecycle forbids
    /// the move, `Conflict` when the order changed concurrently, or a
    /// repository error on store failure.
    pub async fn update_status(
        &self,
        caller: &CurrentUser,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, ApiError> {
        let repo = OrderRepository::new(self.pool);

        let current = repo.get(id).await?.ok_or(ApiError::NotFound("order"))?;

        if !self.policy.can_update_order(caller, current.user_id) {
            return Err(ApiError::Forbidden);
        }

        if !current.status.can_transition_to(next) {
            return Err(ApiError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        match repo.set_status_if(id, current.status, next).await? {
            Some(updated) => {
                tracing::info!(order_id = %id, from = %current.status, to = %next, "order status updated");
                Ok(updated)
            }
            None => Err(ApiError::Conflict("order status changed concurrently")),
        }
    }
}

/// The distinct set of products an item list references. Duplicate lines
/// for the same product collapse here so they cannot skew the catalog
/// existence comparison.
fn distinct_product_ids(items: &[NewOrderItem]) -> HashSet<ProductId> {
    items.iter().map(|item| item.product_id).collect()
}

/// Per-item value checks: positive quantities, non-negative prices.
/// Re-checked here even when the body-shape validator upstream enforces
/// the same bounds.
fn check_item_values(items: &[NewOrderItem]) -> Result<(), ApiError> {
    for item in items {
        if item.quantity <= 0 {
            return Err(ApiError::Validation(format!(
                "quantity must be positive for product {}",
                item.product_id
            )));
        }
        if item.price < Decimal::ZERO {
            return Err(ApiError::Validation(format!(
                "price must not be negative for product {}",
                item.product_id
            )));
        }
    }
    Ok(())
}
