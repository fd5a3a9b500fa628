//! USD-to-token amount conversion.
//!
//! A product's fixed USD price divided by the native token's USD spot price
//! gives the amount the buyer pays. Amounts are exact decimals; a zero or
//! missing spot price is a typed error rather than an infinite or
//! not-a-number amount leaking into the flow.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in displayed token amounts.
pub const DISPLAY_DECIMALS: u32 = 6;

/// Errors that can occur when converting a USD price to a token amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The spot price is zero, negative, or not yet fetched.
    #[error("no usable spot price for conversion")]
    SpotUnavailable,
    /// The division overflowed the decimal range.
    #[error("token amount out of range")]
    AmountOutOfRange,
}

/// Converts a USD value into an amount of the native token at the given
/// USD spot price.
///
/// # Errors
///
/// Returns [`ConvertError::SpotUnavailable`] if `spot` is not strictly
/// positive, and [`ConvertError::AmountOutOfRange`] if the result does not
/// fit the decimal range.
pub fn token_amount(price_usd: Decimal, spot: Decimal) -> Result<Decimal, ConvertError> {
    if spot <= Decimal::ZERO {
        return Err(ConvertError::SpotUnavailable);
    }
    price_usd
        .checked_div(spot)
        .ok_or(ConvertError::AmountOutOfRange)
}

/// Formats a token amount with exactly [`DISPLAY_DECIMALS`] fractional
/// digits, rounding midpoints away from zero.
#[must_use]
pub fn format_token_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_amount_is_price_over_spot() {
        let amount = token_amount(dec("50"), dec("2.5")).unwrap();
        assert_eq!(amount, dec("20"));
        assert_eq!(format_token_amount(amount), "20.000000");
    }

    #[test]
    fn test_six_fractional_digits_always() {
        let amount = token_amount(dec("10"), dec("3000")).unwrap();
        assert_eq!(format_token_amount(amount), "0.003333");

        let amount = token_amount(dec("99.99"), dec("150")).unwrap();
        assert_eq!(format_token_amount(amount), "0.666600");
    }

    #[test]
    fn test_zero_spot_is_an_error() {
        assert_eq!(
            token_amount(dec("50"), Decimal::ZERO),
            Err(ConvertError::SpotUnavailable)
        );
    }

    #[test]
    fn test_negative_spot_is_an_error() {
        assert_eq!(
            token_amount(dec("50"), dec("-1")),
            Err(ConvertError::SpotUnavailable)
        );
    }

    #[test]
    fn test_rounding_away_from_zero() {
        // 1 / 1600000 = 0.000000625 -> rounds up at the sixth digit.
        let amount = token_amount(dec("1"), dec("1600000")).unwrap();
        assert_eq!(format_token_amount(amount), "0.000001");
    }

    #[test]
    fn test_large_amounts_keep_precision() {
        let amount = token_amount(dec("1000000"), dec("0.000001")).unwrap();
        assert_eq!(format_token_amount(amount), "1000000000000.000000");
    }
}
