//! Order management handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use eezy_store_core::{CustomerId, OrderId, OrderStatus};

use crate::db::AdminOrderRepository;
use crate::db::orders::OrderFilter;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{OrderDetail, OrderSummary};
use crate::state::AppState;

/// Query params for the order list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Only orders in this status ("approved" is accepted for pending).
    pub status: Option<String>,
    /// Only orders placed by this customer.
    pub customer_id: Option<i32>,
}

/// Input for a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    /// Target status; must be the single legal next step.
    pub status: String,
}

/// List orders across all customers, newest first.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<OrderSummary>>> {
    let status = params
        .status
        .as_deref()
        .map(OrderStatus::from_str)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let filter = OrderFilter {
        status,
        customer_id: params.customer_id.map(CustomerId::new),
    };

    let orders = AdminOrderRepository::new(state.pool()).list(filter).await?;
    Ok(Json(orders))
}

/// Get a single order with its shipping address and items.
#[instrument(skip(state, _admin))]
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    let order = AdminOrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// Advance an order's fulfillment status one step.
///
/// Only non-viewer roles hold the fulfillment authority; anything but the
/// single legal next status is rejected with `ILLEGAL_TRANSITION` and the
/// stored status is left unchanged.
#[instrument(skip(state, admin))]
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<OrderDetail>> {
    if !admin.role.can_update_orders() {
        return Err(AppError::Forbidden(
            "viewers cannot update order status".to_string(),
        ));
    }

    let target = OrderStatus::from_str(&input.status)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let order = AdminOrderRepository::new(state.pool())
        .update_status(id, target)
        .await?;

    tracing::info!(
        order_id = %id,
        status = %order.status,
        admin = %admin.email,
        "Order status updated"
    );

    Ok(Json(order))
}
