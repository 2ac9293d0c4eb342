//! Order route handlers.
//!
//! Thin wrappers over [`OrderService`]: deserialize, call, serialize.
//! Everything interesting - catalog validation, atomic writes, policy,
//! the status lifecycle - lives in the service.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use verdant_core::{OrderId, OrderStatus};

use crate::auth::CurrentUser;
use crate::error::{ApiError, Result};
use crate::models::{NewOrderItem, Order, OrderWithItems};
use crate::services::OrderService;
use crate::state::AppState;

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    /// Opaque envelope kept for wire compatibility with existing clients.
    /// Nothing in it is read or persisted; payment references are attached
    /// by the (out-of-scope) payment flow, never at creation.
    #[serde(default)]
    pub order: Option<serde_json::Value>,
    pub items: Vec<NewOrderItem>,
}

/// Request body for `PUT /orders/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderBody {
    pub status: String,
}

/// `POST /orders` - create an order for the authenticated buyer.
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<OrderWithItems>)> {
    let service = OrderService::new(state.pool(), state.policy());
    let created = service.create(caller.id, &body.items).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /orders` - list orders visible to the caller.
pub async fn index(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<Json<Vec<Order>>> {
    let service = OrderService::new(state.pool(), state.policy());
    let orders = service.list(&caller).await?;

    Ok(Json(orders))
}

/// `GET /orders/{id}` - a single order merged with its items.
pub async fn show(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>> {
    let service = OrderService::new(state.pool(), state.policy());
    let order = service.get(&caller, id).await?;

    Ok(Json(order))
}

/// `PUT /orders/{id}` - move the order to a new lifecycle state.
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateOrderBody>,
) -> Result<Json<Order>> {
    let next: OrderStatus = body
        .status
        .parse()
        .map_err(|e: verdant_core::StatusParseError| ApiError::Validation(e.to_string()))?;

    let service = OrderService::new(state.pool(), state.policy());
    let updated = service.update_status(&caller, id, next).await?;

    Ok(Json(updated))
}
