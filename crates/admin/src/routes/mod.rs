//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Orders (requires admin auth; writes additionally require a non-viewer role)
//! GET  /api/orders             - List orders (?status=&customer_id=)
//! GET  /api/orders/{id}        - Order detail with address and items
//! PUT  /api/orders/{id}/status - Advance fulfillment status one step
//! ```

pub mod orders;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(orders::list))
        .route("/api/orders/{id}", get(orders::detail))
        .route("/api/orders/{id}/status", put(orders::update_status))
}
