//! Business services for the storefront.
//!
//! Everything that spans more than one table in a single logical write lives
//! here, behind a transaction.

pub mod checkout;
pub mod ratings;

pub use checkout::{CheckoutError, CheckoutService};
pub use ratings::{RatingError, RatingService};
