//! Cart repository - the mutable pre-purchase store.
//!
//! Every operation is scoped to the owning customer; there is no way to reach
//! another customer's cart through this interface. Totals are never stored:
//! reads join the catalog for current prices and the caller computes the sum.

use rust_decimal::Decimal;
use sqlx::PgPool;

use eezy_store_core::{CartId, CartItemId, CustomerId, ProductId, Quantity};

use super::RepositoryError;
use crate::models::CartLine;

/// Internal row type for cart line queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    product_id: i32,
    product_name: String,
    product_image_url: Option<String>,
    unit_price: Decimal,
    quantity: i32,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: CartItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            product_image_url: row.product_image_url,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the customer's cart ID, creating the cart row on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ensure_cart(&self, customer: CustomerId) -> Result<CartId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO carts (customer_id)
            VALUES ($1)
            ON CONFLICT (customer_id) DO UPDATE SET updated_at = now()
            RETURNING id
            ",
        )
        .bind(customer.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(CartId::new(id))
    }

    /// Read the customer's cart lines, oldest first, with current catalog
    /// prices joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, customer: CustomerId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows: Vec<CartLineRow> = sqlx::query_as(
            r"
            SELECT ci.id, ci.product_id,
                   p.name AS product_name,
                   p.image_url AS product_image_url,
                   p.price AS unit_price,
                   ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            JOIN products p ON p.id = ci.product_id
            WHERE c.customer_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(customer.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartLine::from).collect())
    }

    /// Add units of a product to the cart, incrementing an existing line.
    ///
    /// Adding never fails on the per-line cap: the increment saturates at 10
    /// units, and the explicit rejection happens when a quantity is *set*.
    /// Takes a raw count (callers have already rejected values below 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let cart_id = self.ensure_cart(customer).await?;

        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, LEAST($3, 10))
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, 10)
            ",
        )
        .bind(cart_id.as_i32())
        .bind(product.as_i32())
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Set the quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist in this
    /// customer's cart. Returns `RepositoryError::Database` for other errors.
    pub async fn set_quantity(
        &self,
        customer: CustomerId,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_items ci
            SET quantity = $3
            FROM carts c
            WHERE ci.id = $2 AND ci.cart_id = c.id AND c.customer_id = $1
            ",
        )
        .bind(customer.as_i32())
        .bind(item.as_i32())
        .bind(quantity.get())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a cart line. Idempotent: removing an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        customer: CustomerId,
        item: CartItemId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.id = $2 AND ci.cart_id = c.id AND c.customer_id = $1
            ",
        )
        .bind(customer.as_i32())
        .bind(item.as_i32())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Empty the customer's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, customer: CustomerId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.cart_id = c.id AND c.customer_id = $1
            ",
        )
        .bind(customer.as_i32())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
