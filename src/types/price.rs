//! Fixed-point price and quantity helpers.
//!
//! Prices and quantities are `u64` scaled by 10^8, so `5.0` is stored as
//! `500_000_000`. Arithmetic that needs rescaling (price x quantity,
//! notional / volume) goes through `rust_decimal` so results are identical
//! on every platform.
//!
//! ```
//! use price_level::types::price::{from_fixed, to_fixed};
//!
//! let price = to_fixed("5.0").unwrap();
//! assert_eq!(price, 500_000_000);
//! assert_eq!(from_fixed(price), "5.00000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point values: 10^8
pub const SCALE: u64 = 100_000_000;

/// Parse a decimal string into fixed-point.
///
/// Returns `None` for negative, malformed or out-of-range input.
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` into fixed-point, rounding to 8 places.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }
    d.checked_mul(Decimal::from(SCALE))?.round_dp(0).to_u64()
}

/// Widen a fixed-point value back to a `Decimal`.
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render with exactly 8 decimal places.
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Price x quantity as an unscaled `Decimal`.
///
/// `None` on overflow.
pub fn notional(price: u64, quantity: u64) -> Option<Decimal> {
    fixed_to_decimal(price).checked_mul(fixed_to_decimal(quantity))
}

/// Divide an unscaled notional by a fixed-point quantity, yielding a
/// fixed-point price. `None` when `quantity` is zero.
pub fn average_price(notional: Decimal, quantity: u64) -> Option<u64> {
    if quantity == 0 {
        return None;
    }
    let average = notional.checked_div(fixed_to_decimal(quantity))?;
    decimal_to_fixed(average)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed("5.0"), Some(500_000_000));
        assert_eq!(to_fixed("5"), Some(500_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed("-1"), None);
        assert_eq!(to_fixed("five"), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(500_000_000), "5.00000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_notional() {
        // 5.0 x 12.0 = 60
        let n = notional(500_000_000, 1_200_000_000).unwrap();
        assert_eq!(n, Decimal::from(60));
    }

    #[test]
    fn test_average_price() {
        // (5.0 x 10 + 6.0 x 10) / 20 = 5.5
        let total = notional(500_000_000, 1_000_000_000).unwrap()
            + notional(600_000_000, 1_000_000_000).unwrap();
        assert_eq!(average_price(total, 2_000_000_000), Some(550_000_000));
        assert_eq!(average_price(total, 0), None);
    }
}
