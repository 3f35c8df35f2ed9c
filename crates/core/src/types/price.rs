//! Sale-price arithmetic.
//!
//! Money throughout the system is `rust_decimal::Decimal` (NUMERIC(10,2) in
//! the database). A product is on sale when its compare price is strictly
//! greater than its current price; the discount percentage is derived from
//! the two and rounded to the nearest whole percent.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Whether `compare_price` marks the product as on sale.
#[must_use]
pub fn is_on_sale(price: Decimal, compare_price: Option<Decimal>) -> bool {
    compare_price.is_some_and(|cp| cp > price)
}

/// Discount percentage implied by a compare price, rounded to a whole
/// percent. Zero when the product is not on sale.
#[must_use]
pub fn discount_percentage(price: Decimal, compare_price: Option<Decimal>) -> u32 {
    let Some(cp) = compare_price else { return 0 };
    if cp <= price || cp.is_zero() {
        return 0;
    }

    let pct = (cp - price) / cp * Decimal::from(100);
    pct.round().to_u32().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_on_sale_requires_higher_compare_price() {
        assert!(is_on_sale(dec!(80), Some(dec!(100))));
        assert!(!is_on_sale(dec!(100), Some(dec!(100))));
        assert!(!is_on_sale(dec!(100), Some(dec!(80))));
        assert!(!is_on_sale(dec!(100), None));
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(discount_percentage(dec!(80), Some(dec!(100))), 20);
        assert_eq!(discount_percentage(dec!(75.00), Some(dec!(100.00))), 25);
        // Rounded, not truncated
        assert_eq!(discount_percentage(dec!(66.60), Some(dec!(100.00))), 33);
    }

    #[test]
    fn test_discount_percentage_not_on_sale() {
        assert_eq!(discount_percentage(dec!(100), Some(dec!(100))), 0);
        assert_eq!(discount_percentage(dec!(100), Some(dec!(50))), 0);
        assert_eq!(discount_percentage(dec!(100), None), 0);
    }
}
