//! Address domain types.
//!
//! Addresses are append-only: edits are modeled as new records, and exactly
//! one address per customer carries the default flag at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eezy_store_core::{AddressId, CustomerId};

/// A saved shipping address.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning customer.
    pub customer_id: CustomerId,
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
    /// Whether this is the customer's selected/default address.
    pub is_default: bool,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new address.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
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
    /// Request this address become the default. A customer's first address
    /// is forced default regardless of this flag.
    #[serde(default)]
    pub is_default: bool,
}
