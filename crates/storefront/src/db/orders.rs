//! Order repository - customer-scoped reads of placed orders.
//!
//! Orders are created by the checkout service and mutated only by the back
//! office (status) and the rating gate (per-item rating); this repository is
//! read-only.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use eezy_store_core::{
    AddressId, CustomerId, OrderId, OrderItemId, OrderStatus, ProductId, Rating,
};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderRow {
    pub id: i32,
    pub customer_id: i32,
    pub address_id: i32,
    pub status: String,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub rating: i16,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            rating: Rating::from_stored(row.rating),
        }
    }
}

impl OrderRow {
    /// Convert a row plus its item rows into a domain order.
    pub(crate) fn into_order(self, items: Vec<OrderItemRow>) -> Result<Order, RepositoryError> {
        let status = OrderStatus::from_str(&self.status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            address_id: AddressId::new(self.address_id),
            status,
            payment_method: self.payment_method,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }
}

pub(crate) const ORDER_COLUMNS: &str =
    "id, customer_id, address_id, status, payment_method, total_amount, created_at, updated_at";

pub(crate) const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, quantity, unit_price, rating";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the customer's orders with items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(customer.as_i32())
        .fetch_all(self.pool)
        .await?;

        let order_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY id"
        ))
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: std::collections::HashMap<i32, Vec<OrderItemRow>> =
            std::collections::HashMap::new();
        for item in item_rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = items_by_order.remove(&row.id).unwrap_or_default();
            orders.push(row.into_order(items)?);
        }
        Ok(orders)
    }

    /// Get one of the customer's orders with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get_for_customer(
        &self,
        customer: CustomerId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND customer_id = $2"
        ))
        .bind(id.as_i32())
        .bind(customer.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(row.into_order(items)?))
    }
}
