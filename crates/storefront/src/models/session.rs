//! Session-related types.
//!
//! The identity service authenticates customers and writes the resulting
//! identity into the shared session store; this crate only reads it back.

use serde::{Deserialize, Serialize};

use eezy_store_core::CustomerId;

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer's ID, minted by the identity service.
    pub id: CustomerId,
    /// Customer's email address.
    pub email: String,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";
}
