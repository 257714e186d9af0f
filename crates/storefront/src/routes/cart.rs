//! Cart route handlers.
//!
//! Every mutation responds with the updated cart so the client never has to
//! issue a follow-up read; the total is recomputed from current rows on each
//! response.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use eezy_store_core::{CartItemId, CustomerId, ProductId};

use crate::db::{CartRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Cart, QuantityChange};
use crate::state::AppState;

/// Add to cart input.
#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    /// Product to add.
    pub product_id: ProductId,
    /// Units to add; defaults to 1.
    pub quantity: Option<i32>,
}

/// Update cart input.
#[derive(Debug, Deserialize)]
pub struct UpdateCartInput {
    /// Cart line to change.
    pub item_id: CartItemId,
    /// Requested quantity. Below 1 removes the line; above 10 is rejected.
    pub quantity: i32,
}

/// Remove from cart input.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartInput {
    /// Cart line to delete.
    pub item_id: CartItemId,
}

/// Read the cart back with a freshly computed total.
async fn cart_response(state: &AppState, customer: CustomerId) -> Result<Json<Cart>> {
    let lines = CartRepository::new(state.pool()).lines(customer).await?;
    Ok(Json(Cart::from_lines(lines)))
}

/// Get the current cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Cart>> {
    cart_response(&state, customer.id).await
}

/// Add a product to the cart, incrementing an existing line.
///
/// The 1..=10 per-line cap is deliberately not applied here; it is enforced
/// when a quantity is set and again at confirm time.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(input): Json<AddToCartInput>,
) -> Result<Json<Cart>> {
    let quantity = input.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    CartRepository::new(state.pool())
        .add(customer.id, input.product_id, quantity)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product {}", input.product_id)),
            other => AppError::Database(other),
        })?;

    cart_response(&state, customer.id).await
}

/// Set a cart line's quantity. A requested quantity below 1 removes the
/// line; above 10 fails with `QUANTITY_OUT_OF_RANGE`.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(input): Json<UpdateCartInput>,
) -> Result<Json<Cart>> {
    let repo = CartRepository::new(state.pool());

    match QuantityChange::from_requested(input.quantity)? {
        QuantityChange::Remove => repo.remove(customer.id, input.item_id).await?,
        QuantityChange::Set(quantity) => {
            repo.set_quantity(customer.id, input.item_id, quantity)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => {
                        AppError::NotFound(format!("cart item {}", input.item_id))
                    }
                    other => AppError::Database(other),
                })?;
        }
    }

    cart_response(&state, customer.id).await
}

/// Remove a cart line. Removing an absent line is a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(input): Json<RemoveFromCartInput>,
) -> Result<Json<Cart>> {
    CartRepository::new(state.pool())
        .remove(customer.id, input.item_id)
        .await?;

    cart_response(&state, customer.id).await
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Cart>> {
    CartRepository::new(state.pool()).clear(customer.id).await?;

    cart_response(&state, customer.id).await
}
