//! Address repository - the customer's address book.
//!
//! Addresses are append-only. The default flag is the one piece of mutable
//! state, and at most one address per customer may carry it; both writes that
//! touch it run in a transaction that first clears the siblings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use eezy_store_core::{AddressId, CustomerId};

use super::RepositoryError;
use crate::models::{Address, NewAddress};

/// Internal row type for address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i32,
    customer_id: i32,
    name: String,
    phone: String,
    street: String,
    city: String,
    state: String,
    country: String,
    postal_code: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            name: row.name,
            phone: row.phone,
            street: row.street,
            city: row.city,
            state: row.state,
            country: row.country,
            postal_code: row.postal_code,
            is_default: row.is_default,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ADDRESS_COLUMNS: &str = "id, customer_id, name, phone, street, city, state, country, \
                               postal_code, is_default, created_at, updated_at";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the customer's addresses, default first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, customer: CustomerId) -> Result<Vec<Address>, RepositoryError> {
        let rows: Vec<AddressRow> = sqlx::query_as(&format!(
            r"
            SELECT {ADDRESS_COLUMNS}
            FROM addresses
            WHERE customer_id = $1
            ORDER BY is_default DESC, created_at DESC
            "
        ))
        .bind(customer.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    /// Get an address only if it belongs to the customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        customer: CustomerId,
        id: AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let row: Option<AddressRow> = sqlx::query_as(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND customer_id = $2"
        ))
        .bind(id.as_i32())
        .bind(customer.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Create a new address.
    ///
    /// A customer's first address is forced default regardless of the
    /// requested flag; when the new address becomes default, the previous
    /// default is cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn create(
        &self,
        customer: CustomerId,
        input: &NewAddress,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE customer_id = $1")
            .bind(customer.as_i32())
            .fetch_one(&mut *tx)
            .await?;

        let make_default = input.is_default || existing == 0;

        if make_default {
            sqlx::query(
                "UPDATE addresses SET is_default = FALSE, updated_at = now() \
                 WHERE customer_id = $1 AND is_default",
            )
            .bind(customer.as_i32())
            .execute(&mut *tx)
            .await?;
        }

        let row: AddressRow = sqlx::query_as(&format!(
            r"
            INSERT INTO addresses
                (customer_id, name, phone, street, city, state, country, postal_code, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(customer.as_i32())
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.street)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.country)
        .bind(&input.postal_code)
        .bind(make_default)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("default address changed concurrently".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(Address::from(row))
    }

    /// Re-mark the given address as the customer's default, clearing the
    /// previous default in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not belong to
    /// the customer. Returns `RepositoryError::Database` for other errors.
    pub async fn select(
        &self,
        customer: CustomerId,
        id: AddressId,
    ) -> Result<Address, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Verify ownership before touching any default flags.
        let owned: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM addresses WHERE id = $1 AND customer_id = $2 FOR UPDATE",
        )
        .bind(id.as_i32())
        .bind(customer.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            "UPDATE addresses SET is_default = FALSE, updated_at = now() \
             WHERE customer_id = $1 AND is_default AND id <> $2",
        )
        .bind(customer.as_i32())
        .bind(id.as_i32())
        .execute(&mut *tx)
        .await?;

        let row: AddressRow = sqlx::query_as(&format!(
            r"
            UPDATE addresses SET is_default = TRUE, updated_at = now()
            WHERE id = $1 AND customer_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(customer.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Address::from(row))
    }
}
