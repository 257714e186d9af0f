//! Cart domain types.
//!
//! A cart is mutable pre-purchase state owned by exactly one customer. Its
//! total is never stored; it is recomputed from the lines on every read so a
//! catalog price change is reflected immediately until checkout snapshots it.

use rust_decimal::Decimal;
use serde::Serialize;

use eezy_store_core::{CartItemId, ProductId, Quantity, QuantityError, line_total, order_total};

/// One line of a cart: a product reference plus a quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// Cart item ID (stable across quantity updates).
    pub id: CartItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at read time.
    pub product_name: String,
    /// Product image at read time.
    pub product_image_url: Option<String>,
    /// Current catalog unit price.
    pub unit_price: Decimal,
    /// Units of the product, 1..=10.
    pub quantity: i32,
}

impl CartLine {
    /// Line subtotal at the current catalog price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.unit_price, self.quantity)
    }
}

/// A customer's cart with its recomputed total.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    /// Cart lines, oldest first.
    pub items: Vec<CartLine>,
    /// `sum(unit_price * quantity)` over the lines, at current prices.
    pub total: Decimal,
}

impl Cart {
    /// Build a cart view from its lines, computing the total.
    #[must_use]
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total = order_total(items.iter().map(|l| (l.unit_price, l.quantity)));
        Self { items, total }
    }
}

/// Interpretation of a requested quantity on an existing cart line.
///
/// Anything below 1 means "remove the line"; 1..=10 sets it; above 10 is
/// rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Requested quantity was below 1: delete the line.
    Remove,
    /// Set the line to this validated quantity.
    Set(Quantity),
}

impl QuantityChange {
    /// Classify a raw requested quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when the request exceeds the per-line cap.
    pub const fn from_requested(qty: i32) -> Result<Self, QuantityError> {
        if qty < 1 {
            Ok(Self::Remove)
        } else {
            match Quantity::try_new(qty) {
                Ok(quantity) => Ok(Self::Set(quantity)),
                Err(e) => Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn line(id: i32, price: Decimal, qty: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(id),
            product_id: ProductId::new(id),
            product_name: format!("product-{id}"),
            product_image_url: None,
            unit_price: price,
            quantity: qty,
        }
    }

    #[test]
    fn test_cart_total_recomputed_from_lines() {
        // 2 x $10 + 1 x $20 = $40
        let cart = Cart::from_lines(vec![line(1, usd(1000), 2), line(2, usd(2000), 1)]);
        assert_eq!(cart.total, usd(4000));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::from_lines(Vec::new());
        assert_eq!(cart.total, Decimal::ZERO);
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_line_subtotal() {
        assert_eq!(line(1, usd(599), 3).subtotal(), usd(1797));
    }

    #[test]
    fn test_quantity_change_classification() {
        assert_eq!(QuantityChange::from_requested(0), Ok(QuantityChange::Remove));
        assert_eq!(
            QuantityChange::from_requested(-5),
            Ok(QuantityChange::Remove)
        );
        assert!(matches!(
            QuantityChange::from_requested(1),
            Ok(QuantityChange::Set(q)) if q.get() == 1
        ));
        assert!(matches!(
            QuantityChange::from_requested(10),
            Ok(QuantityChange::Set(q)) if q.get() == 10
        ));
        assert_eq!(QuantityChange::from_requested(11), Err(QuantityError(11)));
    }
}
