//! Conversion of human-denominated token amounts to minimal denomination.
//!
//! Ledger amounts are exact financial quantities; all arithmetic here is
//! arbitrary-precision decimal with an explicit rounding mode. Floating
//! point would silently corrupt amounts at the precision chains require and
//! is never used.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use std::str::FromStr;

/// Errors produced by amount conversion.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    /// The input was not a well-formed non-negative decimal string.
    #[error("invalid amount `{0}`: expected a non-negative decimal string")]
    InvalidAmount(String),
}

/// Converts a decimal token amount to the chain's minimal denomination.
///
/// Multiplies `amount` by `10^decimals` and rounds half-up to an integer,
/// e.g. `"5"` with 18 decimals becomes `5_000_000_000_000_000_000`.
pub fn to_minimal_denomination(
    amount: &str,
    decimals: u32,
) -> Result<num_bigint::BigUint, AmountError> {
    let value = BigDecimal::from_str(amount.trim())
        .map_err(|_| AmountError::InvalidAmount(amount.to_owned()))?;

    if value.sign() == Sign::Minus {
        return Err(AmountError::InvalidAmount(amount.to_owned()));
    }

    // `10^decimals` expressed as an unscaled 1 with a negative scale.
    let factor = BigDecimal::new(BigInt::from(1), -i64::from(decimals));
    let scaled = (value * factor).with_scale_round(0, RoundingMode::HalfUp);

    let (minimal, _) = scaled.into_bigint_and_exponent();
    // Sign was checked above and rounding half-up cannot flip it.
    Ok(minimal.to_biguint().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn minimal(amount: &str, decimals: u32) -> BigUint {
        to_minimal_denomination(amount, decimals).unwrap()
    }

    #[test]
    fn converts_whole_tokens() {
        assert_eq!(minimal("5", 18), BigUint::from(5u8) * BigUint::from(10u8).pow(18));
        assert_eq!(minimal("5", 10), BigUint::from(50_000_000_000u64));
        assert_eq!(minimal("0", 18), BigUint::from(0u8));
    }

    #[test]
    fn converts_fractional_tokens() {
        assert_eq!(minimal("1.5", 2), BigUint::from(150u8));
        assert_eq!(minimal("0.000000000000000001", 18), BigUint::from(1u8));
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(minimal("0.5", 0), BigUint::from(1u8));
        assert_eq!(minimal("0.4999", 0), BigUint::from(0u8));
        // 1.0000000000000000005 * 10^18 ends in .5 and rounds up.
        assert_eq!(
            minimal("1.0000000000000000005", 18),
            BigUint::from(10u8).pow(18) + BigUint::from(1u8)
        );
    }

    #[test]
    fn handles_amounts_beyond_128_bits() {
        let amount = "123456789012345678901234567890";
        let expected =
            BigUint::from_str(amount).unwrap() * BigUint::from(10u8).pow(18);
        assert_eq!(minimal(amount, 18), expected);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "abc", "1.2.3", "1,5", "--1"] {
            assert_eq!(
                to_minimal_denomination(bad, 18),
                Err(AmountError::InvalidAmount(bad.to_owned()))
            );
        }
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(
            to_minimal_denomination("-1", 18),
            Err(AmountError::InvalidAmount("-1".to_owned()))
        );
        assert_eq!(
            to_minimal_denomination("-0.0001", 18),
            Err(AmountError::InvalidAmount("-0.0001".to_owned()))
        );
    }
}
