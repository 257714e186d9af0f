//! Validated cart line quantity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum units of a single product per cart line.
pub const MAX_QUANTITY: i32 = 10;

/// A cart line quantity, validated to the 1..=10 range.
///
/// A requested quantity below 1 is not an invalid `Quantity` - it means the
/// line should be removed - so callers check for that before constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i32);

/// Rejected quantity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quantity out of range: {0} (allowed 1..={MAX_QUANTITY})")]
pub struct QuantityError(pub i32);

impl Quantity {
    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] unless `1 <= value <= 10`.
    pub const fn try_new(value: i32) -> Result<Self, QuantityError> {
        if value >= 1 && value <= MAX_QUANTITY {
            Ok(Self(value))
        } else {
            Err(QuantityError(value))
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_accepted() {
        for q in 1..=10 {
            assert_eq!(Quantity::try_new(q).map(Quantity::get), Ok(q));
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Quantity::try_new(0), Err(QuantityError(0)));
        assert_eq!(Quantity::try_new(-3), Err(QuantityError(-3)));
        assert_eq!(Quantity::try_new(11), Err(QuantityError(11)));
        assert_eq!(Quantity::try_new(i32::MAX), Err(QuantityError(i32::MAX)));
    }
}
