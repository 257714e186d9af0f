//! Money arithmetic for cart and order totals.
//!
//! All prices are `rust_decimal::Decimal` in the currency's standard unit
//! (dollars, not cents), matching the NUMERIC(10,2) columns they round-trip
//! through. A total is always `sum(unit_price * quantity)` over the lines it
//! covers; order totals are computed once at checkout from the captured
//! prices and never recomputed afterward.

use rust_decimal::Decimal;

/// Subtotal of a single line.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Total over `(unit_price, quantity)` lines.
#[must_use]
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(price, qty)| line_total(price, qty))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decimal from cents, e.g. `usd(1099)` is $10.99.
    fn usd(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(usd(1000), 2), usd(2000));
        assert_eq!(line_total(usd(99), 3), usd(297));
    }

    #[test]
    fn test_order_total_sums_lines() {
        // 2 x $10 + 1 x $20 = $40
        let total = order_total([(usd(1000), 2), (usd(2000), 1)]);
        assert_eq!(total, usd(4000));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total([]), Decimal::ZERO);
    }

    #[test]
    fn test_no_binary_float_drift() {
        // 0.10 + 0.20 stays exactly 0.30 in decimal
        let total = order_total([(usd(10), 1), (usd(20), 1)]);
        assert_eq!(total, usd(30));
    }
}
