//! Order domain types.
//!
//! An order is an immutable snapshot taken at checkout. Everything on it is
//! fixed at creation except `status` (advanced by the back office) and the
//! per-item rating (written once, post-delivery).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use eezy_store_core::{AddressId, CustomerId, OrderId, OrderItemId, OrderStatus, ProductId, Rating};

/// A placed order with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub customer_id: CustomerId,
    /// Shipping address chosen at checkout.
    pub address_id: AddressId,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment method. Cash on delivery is the only supported method.
    pub payment_method: String,
    /// Total captured at checkout; never recomputed.
    pub total_amount: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last touched (status changes only).
    pub updated_at: DateTime<Utc>,
    /// Snapshot line items.
    pub items: Vec<OrderItem>,
}

/// One line of an order, captured at checkout.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    /// Parent order.
    pub order_id: OrderId,
    /// Product this line snapshotted.
    pub product_id: ProductId,
    /// Product name at checkout time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at checkout time; later catalog edits never change it.
    pub unit_price: Decimal,
    /// Customer rating, `None` until rated post-delivery.
    pub rating: Option<Rating>,
}
