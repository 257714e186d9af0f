//! Order fulfillment status and its transition rules.
//!
//! An order is created in [`OrderStatus::Pending`] and advances one step at a
//! time under admin control until it reaches the terminal
//! [`OrderStatus::Delivered`] state. Customers never write this field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order fulfillment status.
///
/// The only legal walk is `pending -> shipped -> delivered`; there is no
/// skipping, no reverting, and no transition out of `delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state on creation. Surfaced to admins as "approved" - an order
    /// that exists is one the shop has implicitly accepted.
    #[default]
    Pending,
    /// Handed to the carrier.
    Shipped,
    /// Terminal state. Ratings unlock here.
    Delivered,
}

impl OrderStatus {
    /// The single legal successor state, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether advancing from `self` to `target` is a legal transition.
    ///
    /// Only the immediate successor is legal; everything else (skip, revert,
    /// self-transition, anything out of `delivered`) is not.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Whether this status permits rating the order's items.
    #[must_use]
    pub const fn allows_rating(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Canonical lowercase name, as stored and serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an order status from its stored/wire form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0}")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "approved" is how the first admin-visible state is surfaced.
            "pending" | "approved" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

/// A rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal transition: {from} -> {to}")]
pub struct TransitionError {
    /// Status the order was in when the transition was attempted.
    pub from: OrderStatus,
    /// Requested target status.
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Validate a requested transition, returning the target on success.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] unless `target` is the immediate successor
    /// of `self`.
    pub fn advance_to(self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: self,
                to: target,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_only_forward_steps_are_legal() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));

        // Skip
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        // Revert
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        // Self-transition
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_delivered_is_terminal() {
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_advance_to_reports_both_ends() {
        let err = OrderStatus::Shipped
            .advance_to(OrderStatus::Pending)
            .expect_err("revert must be rejected");
        assert_eq!(err.from, OrderStatus::Shipped);
        assert_eq!(err.to, OrderStatus::Pending);

        assert_eq!(
            OrderStatus::Pending.advance_to(OrderStatus::Shipped),
            Ok(OrderStatus::Shipped)
        );
    }

    #[test]
    fn test_rating_unlocks_only_when_delivered() {
        assert!(!OrderStatus::Pending.allows_rating());
        assert!(!OrderStatus::Shipped.allows_rating());
        assert!(OrderStatus::Delivered.allows_rating());
    }

    #[test]
    fn test_parse_accepts_approved_alias() {
        assert_eq!(
            OrderStatus::from_str("approved"),
            Ok(OrderStatus::Pending)
        );
        assert_eq!(OrderStatus::from_str("pending"), Ok(OrderStatus::Pending));
        assert_eq!(OrderStatus::from_str("shipped"), Ok(OrderStatus::Shipped));
        assert_eq!(
            OrderStatus::from_str("delivered"),
            Ok(OrderStatus::Delivered)
        );
        assert!(OrderStatus::from_str("cancelled").is_err());
        assert!(OrderStatus::from_str("PENDING").is_err());
    }

    #[test]
    fn test_display_is_canonical_lowercase() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Shipped.to_string(), "shipped");
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let json = serde_json::to_string(&OrderStatus::Delivered).expect("serialize");
        assert_eq!(json, "\"delivered\"");
        let back: OrderStatus = serde_json::from_str("\"shipped\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Shipped);
    }
}
