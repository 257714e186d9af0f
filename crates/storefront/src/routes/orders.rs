//! Order route handlers: placement, history, and rating.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use eezy_store_core::{AddressId, OrderId, OrderItemId};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Order, OrderItem};
use crate::services::{CheckoutService, RatingService};
use crate::state::AppState;

/// Place order input.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderInput {
    /// Shipping address; must belong to the customer.
    pub address_id: AddressId,
}

/// Rate item input.
#[derive(Debug, Deserialize)]
pub struct RateItemInput {
    /// Stars, 1..=5.
    pub score: i16,
}

/// Place an order from the current cart.
///
/// Snapshots the cart at current prices, creates the order in `pending`
/// status, and clears the cart - atomically.
#[instrument(skip(state))]
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(input): Json<PlaceOrderInput>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = CheckoutService::new(state.pool())
        .place_order(customer.id, input.address_id)
        .await?;

    tracing::info!(order_id = %order.id, total = %order.total_amount, "Order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the customer's orders, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;
    Ok(Json(orders))
}

/// Get one of the customer's orders.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get_for_customer(customer.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// Rate a delivered order item, exactly once.
#[instrument(skip(state))]
pub async fn rate_item(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path((order_id, item_id)): Path<(OrderId, OrderItemId)>,
    Json(input): Json<RateItemInput>,
) -> Result<Json<OrderItem>> {
    let item = RatingService::new(state.pool())
        .rate(customer.id, order_id, item_id, input.score)
        .await?;

    tracing::info!(order_id = %order_id, item_id = %item_id, score = input.score, "Item rated");

    Ok(Json(item))
}
