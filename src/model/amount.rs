//! Monetary amounts.
//!
//! `Amount` wraps a `Decimal` so that money is never handled as floating point. It parses plain
//! values (`86000.00`) as well as values written with a dollar sign and thousands separators
//! (`$86,000.00`), and it always displays with two decimal places.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// Rounds `value` to `dp` decimal places, with midpoints rounded away from zero (`ROUND` in SQL).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` half-up to exactly two decimal places, padding with zeros when needed.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut cents = round_half_up(value, 2);
    cents.rescale(2);
    cents
}

/// Represents an amount of money.
///
/// Equality and ordering are numeric: `$1,000.00` and `1000` are the same amount.
///
/// ```
/// # use finwin::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("$86,000").unwrap();
/// let b = Amount::from_str("86000.00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "86,000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is below zero. Negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError {
    input: String,
    source: rust_decimal::Error,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?}, {:?})", self.input, self.source)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to parse '{}' as an amount: {}", self.input, self.source)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned).replace(',', "");
        let value = Decimal::from_str(&digits).map_err(|source| AmountError {
            input: s.to_string(),
            source,
        })?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cents = to_cents(self.0);
        // An f64 holds every whole number of cents up to 2^53 exactly.
        let exact = cents
            .abs()
            .checked_mul(Decimal::ONE_HUNDRED)
            .is_some_and(|c| c <= Decimal::from(1u64 << 53));
        if !exact {
            return write!(f, "{cents}");
        }
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{sign}{}",
            format_num::format_num!(",.2", cents.abs().to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_cents(self.0).to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("86000.00").unwrap();
        assert_eq!(amount.value(), dec("86000"));
    }

    #[test]
    fn test_parse_dollar_and_commas() {
        let amount = Amount::from_str("  $1,234,567.89 ").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert!(amount.is_negative());
        assert_eq!(amount.value(), dec("-50"));
    }

    #[test]
    fn test_parse_garbage() {
        let err = Amount::from_str("twelve").unwrap_err();
        assert!(err.to_string().contains("twelve"));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_zero_is_not_negative() {
        let zero = Amount::from_str("-0.00").unwrap();
        assert_eq!(zero.value(), Decimal::ZERO);
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec("75000")).to_string(), "75,000.00");
        assert_eq!(Amount::new(dec("9.333")).to_string(), "9.33");
        assert_eq!(Amount::new(dec("-50")).to_string(), "-50.00");
        assert_eq!(Amount::new(dec("1234567.89")).to_string(), "1,234,567.89");
    }

    #[test]
    fn test_display_beyond_f64_precision_is_plain() {
        let huge = Amount::new(dec("100000000000000000000"));
        assert_eq!(huge.to_string(), "100000000000000000000.00");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec("9.335"), 2), dec("9.34"));
        assert_eq!(round_half_up(dec("9.334"), 2), dec("9.33"));
        assert_eq!(round_half_up(dec("-9.335"), 2), dec("-9.34"));
    }

    #[test]
    fn test_to_cents_pads() {
        assert_eq!(to_cents(dec("78500")).to_string(), "78500.00");
        assert_eq!(to_cents(dec("1.005")).to_string(), "1.01");
    }

    #[test]
    fn test_serde() {
        let amount = Amount::new(dec("82000"));
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"82000.00\"");
        let back: Amount = serde_json::from_str("\"$82,000\"").unwrap();
        assert_eq!(back, amount);
    }
}
