//! Checkout - turning a mutable cart into an immutable order.
//!
//! The whole of `place_order` is one transaction: price capture, order row,
//! item rows, and the cart clear commit together or not at all. A checkout
//! that fails at any step leaves the cart exactly as it was.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use eezy_store_core::{AddressId, CustomerId, OrderId, order_total};

use crate::db::RepositoryError;
use crate::db::orders::{ORDER_COLUMNS, OrderItemRow, OrderRow};
use crate::models::Order;

/// Failures specific to placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The customer's cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The shipping address does not exist or belongs to another customer.
    #[error("address does not belong to this customer")]
    InvalidAddress,

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Cart line as captured inside the checkout transaction.
#[derive(Debug, sqlx::FromRow)]
struct SnapshotLine {
    product_id: i32,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
}

/// The checkout orchestrator.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the customer's current cart.
    ///
    /// Captures a per-line price snapshot, creates the order in `pending`
    /// status, and clears the cart - all in one transaction, with the cart
    /// clear ordered strictly after the order-row creation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines,
    /// [`CheckoutError::InvalidAddress`] if the address is not the
    /// customer's, and [`CheckoutError::Repository`] for storage failures.
    pub async fn place_order(
        &self,
        customer: CustomerId,
        address: AddressId,
    ) -> Result<Order, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        // Lock the cart lines so a concurrent checkout or mutation from a
        // second session serializes behind this one.
        let lines: Vec<SnapshotLine> = sqlx::query_as(
            r"
            SELECT ci.product_id,
                   p.name AS product_name,
                   p.price AS unit_price,
                   ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            JOIN products p ON p.id = ci.product_id
            WHERE c.customer_id = $1
            ORDER BY ci.id
            FOR UPDATE OF ci
            ",
        )
        .bind(customer.as_i32())
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let owned: Option<i32> =
            sqlx::query_scalar("SELECT id FROM addresses WHERE id = $1 AND customer_id = $2")
                .bind(address.as_i32())
                .bind(customer.as_i32())
                .fetch_optional(&mut *tx)
                .await?;

        if owned.is_none() {
            return Err(CheckoutError::InvalidAddress);
        }

        let total = order_total(lines.iter().map(|l| (l.unit_price, l.quantity)));

        let order_row: OrderRow = sqlx::query_as(&format!(
            r"
            INSERT INTO orders (customer_id, address_id, status, payment_method, total_amount)
            VALUES ($1, $2, 'pending', 'cash-on-delivery', $3)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(customer.as_i32())
        .bind(address.as_i32())
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        let order_id = OrderId::new(order_row.id);
        let mut item_rows = Vec::with_capacity(lines.len());
        for line in &lines {
            item_rows.push(insert_item(&mut tx, order_id, line).await?);
        }

        // Clear the cart only now that the order rows exist; a failure above
        // rolls everything back and the cart survives untouched.
        sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.cart_id = c.id AND c.customer_id = $1
            ",
        )
        .bind(customer.as_i32())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order_row.into_order(item_rows)?)
    }
}

/// Insert one snapshot line for the order.
async fn insert_item(
    tx: &mut Transaction<'_, Postgres>,
    order_id: OrderId,
    line: &SnapshotLine,
) -> Result<OrderItemRow, sqlx::Error> {
    sqlx::query_as(
        r"
        INSERT INTO order_items (order_id, product_id, product_name, quantity, unit_price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, order_id, product_id, product_name, quantity, unit_price, rating
        ",
    )
    .bind(order_id.as_i32())
    .bind(line.product_id)
    .bind(&line.product_name)
    .bind(line.quantity)
    .bind(line.unit_price)
    .fetch_one(&mut **tx)
    .await
}
