//! Core types for Eezy Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod quantity;
pub mod rating;
pub mod status;

pub use id::*;
pub use money::{line_total, order_total};
pub use quantity::{Quantity, QuantityError};
pub use rating::{Rating, RatingValueError};
pub use status::{OrderStatus, StatusParseError, TransitionError};
