//! Database operations for the storefront `PostgreSQL`.
//!
//! # Database: `eezy_store`
//!
//! The storefront owns the commerce tables; the admin binary connects to the
//! same database but only ever advances `orders.status`.
//!
//! ## Tables
//!
//! - `products` - Catalog read surface (managed elsewhere)
//! - `product_ratings` - Per-customer rating feed, aggregated on product reads
//! - `addresses` - Customer shipping addresses (append-only)
//! - `carts` / `cart_items` - One mutable cart per customer
//! - `orders` / `order_items` - Immutable checkout snapshots
//! - `tower_sessions.session` - Session store (identity service writes it)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p eezy-store-cli -- migrate
//! ```

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate default address).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
