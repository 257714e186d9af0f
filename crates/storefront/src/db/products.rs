//! Product repository for catalog reads.
//!
//! The catalog is managed outside this binary; the storefront only reads it,
//! joining in the average rating from the `product_ratings` feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use eezy_store_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
    average_rating: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            average_rating: row.average_rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.name, p.description, p.price, p.image_url,
           COALESCE(AVG(r.score), 0)::numeric(3,2) AS average_rating,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN product_ratings r ON r.product_id = p.id
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "{PRODUCT_SELECT} GROUP BY p.id ORDER BY p.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{PRODUCT_SELECT} WHERE p.id = $1 GROUP BY p.id"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Product::from))
    }
}
