//! Admin order repository: fulfillment reads and the status write.
//!
//! Status writes are optimistic: the UPDATE is keyed on the status the
//! transition was validated against, so two admins racing on the same order
//! cannot both advance it - the loser's source state no longer matches and
//! the write affects zero rows.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use eezy_store_core::{
    CustomerId, OrderId, OrderItemId, OrderStatus, ProductId, Rating, TransitionError,
};

use super::RepositoryError;
use crate::models::{OrderDetail, OrderItem, OrderSummary, ShippingAddress};

/// Failures specific to a status update.
#[derive(Debug, Error)]
pub enum StatusUpdateError {
    /// No such order.
    #[error("order not found")]
    NotFound,

    /// The requested transition is not the single legal next step, or the
    /// order moved concurrently and the source state went stale.
    #[error(transparent)]
    Illegal(#[from] TransitionError),

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for StatusUpdateError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Filter for the order list.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderFilter {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
    /// Only orders placed by this customer.
    pub customer_id: Option<CustomerId>,
}

/// Internal row type for order list queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    id: i32,
    customer_id: i32,
    status: String,
    payment_method: String,
    total_amount: Decimal,
    item_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Internal row type for order detail queries (order joined with address).
#[derive(Debug, sqlx::FromRow)]
struct OrderDetailRow {
    id: i32,
    customer_id: i32,
    status: String,
    payment_method: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    address_name: String,
    address_phone: String,
    address_street: String,
    address_city: String,
    address_state: String,
    address_country: String,
    address_postal_code: String,
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    product_id: i32,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    rating: i16,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            rating: Rating::from_stored(row.rating),
        }
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, RepositoryError> {
    OrderStatus::from_str(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

/// Repository for admin order operations.
pub struct AdminOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminOrderRepository<'a> {
    /// Create a new admin order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders across all customers, newest first, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list(&self, filter: OrderFilter) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows: Vec<OrderSummaryRow> = sqlx::query_as(
            r"
            SELECT o.id, o.customer_id, o.status, o.payment_method, o.total_amount,
                   (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS item_count,
                   o.created_at, o.updated_at
            FROM orders o
            WHERE ($1::text IS NULL OR o.status = $1)
              AND ($2::int IS NULL OR o.customer_id = $2)
            ORDER BY o.created_at DESC
            ",
        )
        .bind(filter.status.map(OrderStatus::as_str))
        .bind(filter.customer_id.map(|c| c.as_i32()))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(OrderSummary {
                    id: OrderId::new(row.id),
                    customer_id: CustomerId::new(row.customer_id),
                    status: parse_status(&row.status)?,
                    payment_method: row.payment_method,
                    total_amount: row.total_amount,
                    item_count: row.item_count,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            })
            .collect()
    }

    /// Get a single order with its shipping address and items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderDetail>, RepositoryError> {
        let row: Option<OrderDetailRow> = sqlx::query_as(
            r"
            SELECT o.id, o.customer_id, o.status, o.payment_method, o.total_amount,
                   o.created_at, o.updated_at,
                   a.name AS address_name,
                   a.phone AS address_phone,
                   a.street AS address_street,
                   a.city AS address_city,
                   a.state AS address_state,
                   a.country AS address_country,
                   a.postal_code AS address_postal_code
            FROM orders o
            JOIN addresses a ON a.id = o.address_id
            WHERE o.id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow> = sqlx::query_as(
            r"
            SELECT id, product_id, product_name, quantity, unit_price, rating
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderDetail {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            status: parse_status(&row.status)?,
            payment_method: row.payment_method,
            total_amount: row.total_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
            address: ShippingAddress {
                name: row.address_name,
                phone: row.address_phone,
                street: row.address_street,
                city: row.address_city,
                state: row.address_state,
                country: row.address_country,
                postal_code: row.address_postal_code,
            },
            items: items.into_iter().map(OrderItem::from).collect(),
        }))
    }

    /// Advance an order to the next fulfillment status.
    ///
    /// The transition is validated against the current status and the write
    /// is keyed on it; if a concurrent update moved the order first, the
    /// write affects zero rows and the transition is rejected against the
    /// fresh state rather than last-writer-winning.
    ///
    /// # Errors
    ///
    /// Returns [`StatusUpdateError::NotFound`] for an unknown order and
    /// [`StatusUpdateError::Illegal`] for anything but the single legal next
    /// step.
    pub async fn update_status(
        &self,
        id: OrderId,
        target: OrderStatus,
    ) -> Result<OrderDetail, StatusUpdateError> {
        let current_raw: Option<String> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        let Some(current_raw) = current_raw else {
            return Err(StatusUpdateError::NotFound);
        };
        let current = parse_status(&current_raw)?;

        current.advance_to(target)?;

        let updated = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = now() WHERE id = $2 AND status = $3",
        )
        .bind(target.as_str())
        .bind(id.as_i32())
        .bind(current.as_str())
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            // Lost a race: report the transition against the fresh state.
            let fresh_raw: Option<String> =
                sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
                    .bind(id.as_i32())
                    .fetch_optional(self.pool)
                    .await?;
            let Some(fresh_raw) = fresh_raw else {
                return Err(StatusUpdateError::NotFound);
            };
            let fresh = parse_status(&fresh_raw)?;
            return Err(StatusUpdateError::Illegal(TransitionError {
                from: fresh,
                to: target,
            }));
        }

        self.get(id)
            .await?
            .ok_or(StatusUpdateError::NotFound)
    }
}
