//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as JSON numbers (`29.99`) and are held as [`Decimal`] so
//! that averages and totals never pick up float rounding noise.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input could not be parsed as a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative product price in the store's currency unit.
///
/// ```
/// use catalog_admin_core::Price;
///
/// let price: Price = "19.90".parse().unwrap();
/// assert_eq!(price.to_string(), "19.90");
/// assert!("-5".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!("10".parse::<Price>().unwrap().amount(), Decimal::new(10, 0));
        assert_eq!(
            " 4.5 ".parse::<Price>().unwrap().amount(),
            Decimal::new(45, 1)
        );
        assert!("0".parse::<Price>().unwrap().is_zero());
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert_eq!("-5".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("ten".parse::<Price>(), Err(PriceError::NotANumber));
        assert_eq!("".parse::<Price>(), Err(PriceError::NotANumber));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(1999).unwrap().to_string(), "19.99");
        assert!(Price::from_cents(-1).is_err());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!("3".parse::<Price>().unwrap().to_string(), "3.00");
    }

    #[test]
    fn test_json_number_roundtrip() {
        let price: Price = serde_json::from_str("29.99").unwrap();
        assert_eq!(price.to_string(), "29.99");
        assert_eq!(serde_json::to_string(&price).unwrap(), "29.99");

        let whole: Price = serde_json::from_str("120").unwrap();
        assert_eq!(whole.amount(), Decimal::new(120, 0));
    }

    #[test]
    fn test_json_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-1.5").is_err());
    }
}
