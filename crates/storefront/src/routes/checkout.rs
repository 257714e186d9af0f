//! Checkout details route handler.
//!
//! The data a checkout page renders before the order is placed: current cart
//! lines with a freshly computed total, and the address book (default first)
//! to pick the shipping address from.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::{AddressRepository, CartRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Address, Cart};
use crate::state::AppState;

/// Checkout page data.
#[derive(Debug, Serialize)]
pub struct CheckoutDetails {
    /// Cart lines with the recomputed total.
    pub cart: Cart,
    /// The customer's addresses, default first.
    pub addresses: Vec<Address>,
}

/// Get the checkout details.
#[instrument(skip(state))]
pub async fn details(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<CheckoutDetails>> {
    let lines = CartRepository::new(state.pool()).lines(customer.id).await?;
    let addresses = AddressRepository::new(state.pool()).list(customer.id).await?;

    Ok(Json(CheckoutDetails {
        cart: Cart::from_lines(lines),
        addresses,
    }))
}
