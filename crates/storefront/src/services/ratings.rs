//! The rating gate - one post-delivery rating per purchased item.
//!
//! A rating is only writable while the parent order sits in the terminal
//! delivered state, and only if the item has never been rated. The write
//! itself is guarded with `AND rating = 0`, so two racing submissions cannot
//! both land even without the row lock.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use eezy_store_core::{CustomerId, OrderId, OrderItemId, OrderStatus, Rating, RatingValueError};

use crate::db::RepositoryError;
use crate::db::orders::OrderItemRow;
use crate::models::OrderItem;

/// Failures specific to rating an order item.
#[derive(Debug, Error)]
pub enum RatingError {
    /// Stars outside 1..=5.
    #[error(transparent)]
    InvalidValue(#[from] RatingValueError),

    /// Parent order has not reached the delivered state.
    #[error("order is not delivered")]
    NotDelivered,

    /// The item already carries a rating; ratings are written exactly once.
    #[error("order item is already rated")]
    AlreadyRated,

    /// No such order item in this customer's orders.
    #[error("order item not found")]
    NotFound,

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for RatingError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Order item joined with its parent order's state, as read under lock.
#[derive(Debug, sqlx::FromRow)]
struct GateRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    rating: i16,
    order_status: String,
}

/// The rating gate service.
pub struct RatingService<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingService<'a> {
    /// Create a new rating service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Rate an order item, exactly once, post-delivery.
    ///
    /// On success the score is also appended to the product's rating feed,
    /// from which the catalog's average rating is aggregated.
    ///
    /// # Errors
    ///
    /// - [`RatingError::InvalidValue`] unless `1 <= stars <= 5`
    /// - [`RatingError::NotFound`] if the item is not in this customer's orders
    /// - [`RatingError::NotDelivered`] unless the parent order is delivered
    /// - [`RatingError::AlreadyRated`] if a rating was already written
    pub async fn rate(
        &self,
        customer: CustomerId,
        order: OrderId,
        item: OrderItemId,
        stars: i16,
    ) -> Result<OrderItem, RatingError> {
        let rating = Rating::try_new(stars)?;

        let mut tx = self.pool.begin().await?;

        // Serialize racing submissions for the same item behind a row lock.
        let row: Option<GateRow> = sqlx::query_as(
            r"
            SELECT oi.id, oi.order_id, oi.product_id, oi.product_name,
                   oi.quantity, oi.unit_price, oi.rating,
                   o.status AS order_status
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.id = $1 AND oi.id = $2 AND o.customer_id = $3
            FOR UPDATE OF oi
            ",
        )
        .bind(order.as_i32())
        .bind(item.as_i32())
        .bind(customer.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(RatingError::NotFound);
        };

        let status = OrderStatus::from_str(&row.order_status).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        if !status.allows_rating() {
            return Err(RatingError::NotDelivered);
        }

        if Rating::from_stored(row.rating).is_some() {
            return Err(RatingError::AlreadyRated);
        }

        let updated = sqlx::query("UPDATE order_items SET rating = $1 WHERE id = $2 AND rating = 0")
            .bind(rating.get())
            .bind(item.as_i32())
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(RatingError::AlreadyRated);
        }

        sqlx::query(
            "INSERT INTO product_ratings (product_id, customer_id, score) VALUES ($1, $2, $3)",
        )
        .bind(row.product_id)
        .bind(customer.as_i32())
        .bind(rating.get())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OrderItem::from(OrderItemRow {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            rating: rating.get(),
        }))
    }
}
