//! Product route handlers.
//!
//! Plain single-table CRUD; the only rule is that catalog management needs
//! a seller or admin caller. No cross-entity logic lives here.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use verdant_core::ProductId;

use crate::auth::CurrentUser;
use crate::db::ProductRepository;
use crate::error::{ApiError, Result};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::policy::can_manage_products;
use crate::state::AppState;

/// `GET /products` - the whole catalog, public.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - one product, public.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("product"))?;

    Ok(Json(product))
}

/// `POST /products` - add a catalog product (seller/admin).
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    if !can_manage_products(caller.role) {
        return Err(ApiError::Forbidden);
    }

    let product = ProductRepository::new(state.pool()).create(&body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}` - partial update (seller/admin).
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductPatch>,
) -> Result<Json<Product>> {
    if !can_manage_products(caller.role) {
        return Err(ApiError::Forbidden);
    }

    let product = ProductRepository::new(state.pool())
        .update(id, &body)
        .await?
        .ok_or(ApiError::NotFound("product"))?;

    Ok(Json(product))
}

/// `DELETE /products/{id}` - remove a product (seller/admin).
pub async fn destroy(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    if !can_manage_products(caller.role) {
        return Err(ApiError::Forbidden);
    }

    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("product"))
    }
}
