//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Products (catalog read surface)
//! GET  /api/products           - Product listing with average ratings
//! GET  /api/products/{id}      - Product detail
//!
//! # Cart (requires auth)
//! GET  /api/cart               - Cart with recomputed total
//! POST /api/cart/add           - Add product (increments existing line)
//! POST /api/cart/update        - Set line quantity (< 1 removes)
//! POST /api/cart/remove        - Remove line (idempotent)
//! POST /api/cart/clear         - Empty the cart
//!
//! # Addresses (requires auth)
//! GET  /api/addresses          - List, default first
//! POST /api/addresses          - Create (first address forced default)
//! POST /api/addresses/{id}/select - Re-mark as default
//!
//! # Checkout & orders (requires auth)
//! GET  /api/checkout           - Cart lines + total + addresses
//! POST /api/orders             - Place order from cart
//! GET  /api/orders             - Order history with items
//! GET  /api/orders/{id}        - Single order
//! POST /api/orders/{id}/items/{item_id}/rating - Rate a delivered item
//! ```

pub mod addresses;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::list))
        .route("/api/products/{id}", get(products::detail))
        .route("/api/cart", get(cart::show))
        .route("/api/cart/add", post(cart::add))
        .route("/api/cart/update", post(cart::update))
        .route("/api/cart/remove", post(cart::remove))
        .route("/api/cart/clear", post(cart::clear))
        .route("/api/addresses", get(addresses::list).post(addresses::create))
        .route("/api/addresses/{id}/select", post(addresses::select))
        .route("/api/checkout", get(checkout::details))
        .route("/api/orders", get(orders::list).post(orders::place))
        .route("/api/orders/{id}", get(orders::detail))
        .route(
            "/api/orders/{id}/items/{item_id}/rating",
            post(orders::rate_item),
        )
}
