//! Monetary rounding and lenient numeric parsing.
//!
//! Discipline used throughout the crate: per-record derived values
//! (effective return, potential return) are rounded to 2 decimal places as
//! they are computed; aggregate sums accumulate exact and are rounded once
//! at emission. Rates (win rate, ROI, edge) stay unrounded Decimal ratios.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a user-supplied decimal, substituting `default` when the input
/// is not a valid number. Invalid input is never a hard failure.
pub fn parse_decimal_or(input: &str, default: Decimal) -> Decimal {
    input.trim().parse::<Decimal>().unwrap_or(default)
}

/// Safe ratio: a zero denominator yields zero instead of an error.
pub fn ratio(numer: Decimal, denom: Decimal) -> Decimal {
    if denom.is_zero() {
        Decimal::ZERO
    } else {
        numer / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_is_half_up() {
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(2.674)), dec!(2.67));
        assert_eq!(round2(dec!(10)), dec!(10.00));
    }

    #[test]
    fn parse_decimal_falls_back() {
        assert_eq!(parse_decimal_or("12.50", Decimal::ZERO), dec!(12.50));
        assert_eq!(parse_decimal_or("  3 ", Decimal::ZERO), dec!(3));
        assert_eq!(parse_decimal_or("abc", dec!(1)), dec!(1));
        assert_eq!(parse_decimal_or("", dec!(1)), dec!(1));
    }

    #[test]
    fn ratio_handles_zero_denominator() {
        assert_eq!(ratio(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio(dec!(11), dec!(20)), dec!(0.55));
    }
}
