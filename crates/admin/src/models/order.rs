//! Order views for the back office.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use eezy_store_core::{CustomerId, OrderId, OrderItemId, OrderStatus, ProductId, Rating};

/// One row of the order list.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    /// Order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub customer_id: CustomerId,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment method recorded at checkout.
    pub payment_method: String,
    /// Total captured at checkout.
    pub total_amount: Decimal,
    /// Number of line items.
    pub item_count: i64,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// Full order detail with shipping address and items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    /// Order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub customer_id: CustomerId,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Payment method recorded at checkout.
    pub payment_method: String,
    /// Total captured at checkout.
    pub total_amount: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
    /// Shipping address chosen at checkout.
    pub address: ShippingAddress,
    /// Snapshot line items.
    pub items: Vec<OrderItem>,
}

/// Shipping address as shown on the order sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingAddress {
    /// Recipient name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
}

/// One snapshot line of an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Order item ID.
    pub id: OrderItemId,
    /// Product this line snapshotted.
    pub product_id: ProductId,
    /// Product name at checkout time.
    pub product_name: String,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at checkout time.
    pub unit_price: Decimal,
    /// Customer rating, `None` until rated post-delivery.
    pub rating: Option<Rating>,
}
