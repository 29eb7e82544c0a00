//! Money helpers
//!
//! All prices, fees and rates in the engine are `rust_decimal::Decimal`.
//! Rounding to currency precision happens exactly once, at the end of a
//! breakdown, so intermediate values keep full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in the currency (cents)
pub const CURRENCY_DP: u32 = 2;

/// Round a monetary amount to cents, half-up
///
/// # Example
/// ```
/// use repair_pricing_core_rs::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(31.915)), dec!(31.92));
/// assert_eq!(round2(dec!(31.914)), dec!(31.91));
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp an amount to zero from below
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
