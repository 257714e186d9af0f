//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use eezy_store_core::ProductId;

/// A catalog product.
///
/// The catalog itself is managed elsewhere; the storefront reads it to build
/// carts and to snapshot prices into orders.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Current catalog price. Orders capture their own copy of this at
    /// checkout; changing it never rewrites an existing order.
    pub price: Decimal,
    /// Product image URL, if one has been uploaded.
    pub image_url: Option<String>,
    /// Average of all submitted ratings, 0 when unrated.
    pub average_rating: Decimal,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
