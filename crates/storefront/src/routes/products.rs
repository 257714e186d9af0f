//! Product catalog route handlers (read-only).

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use eezy_store_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// List the catalog with average ratings.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Get a single product.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}
