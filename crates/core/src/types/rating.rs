//! Validated star rating.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product rating, validated to 1..=5 stars.
///
/// On an order item the *absence* of a rating is stored as 0; that sentinel
/// never appears inside this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i16);

/// Rejected rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid rating value: {0} (allowed 1..=5)")]
pub struct RatingValueError(pub i16);

impl Rating {
    /// Validate a raw star value.
    ///
    /// # Errors
    ///
    /// Returns [`RatingValueError`] unless `1 <= stars <= 5`.
    pub const fn try_new(stars: i16) -> Result<Self, RatingValueError> {
        if stars >= 1 && stars <= 5 {
            Ok(Self(stars))
        } else {
            Err(RatingValueError(stars))
        }
    }

    /// Interpret a stored order-item rating column, where 0 means unrated.
    #[must_use]
    pub const fn from_stored(value: i16) -> Option<Self> {
        match Self::try_new(value) {
            Ok(rating) => Some(rating),
            Err(_) => None,
        }
    }

    /// Get the underlying star count.
    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_stars() {
        for stars in 1..=5 {
            assert_eq!(Rating::try_new(stars).map(Rating::get), Ok(stars));
        }
    }

    #[test]
    fn test_invalid_stars() {
        assert_eq!(Rating::try_new(0), Err(RatingValueError(0)));
        assert_eq!(Rating::try_new(6), Err(RatingValueError(6)));
        assert_eq!(Rating::try_new(-1), Err(RatingValueError(-1)));
    }

    #[test]
    fn test_from_stored_treats_zero_as_unrated() {
        assert_eq!(Rating::from_stored(0), None);
        assert_eq!(Rating::from_stored(4), Rating::try_new(4).ok());
        // Out-of-range garbage in the column also reads as unrated
        assert_eq!(Rating::from_stored(9), None);
    }
}
