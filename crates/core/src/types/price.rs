//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are held as a [`Decimal`] rounded to cents. They are stored as
//! integer cents (see [`Price::from_cents`] and [`Price::to_cents`]) and
//! rendered on the wire as plain JSON numbers.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`Price::MAX_CENTS`], or arithmetic on it overflowed.
    #[error("price is out of range")]
    OutOfRange,
}

/// A non-negative monetary amount with two decimal places.
///
/// ## Examples
///
/// ```
/// use pocket_shop_core::{Price, Quantity};
///
/// let price = Price::from_cents(1999).unwrap();
/// assert_eq!(price.to_string(), "$19.99");
///
/// let qty = Quantity::new(3).unwrap();
/// assert_eq!(price.times(qty).unwrap().to_cents().unwrap(), 5997);
///
/// assert!(Price::from_cents(-1).is_err());
/// assert!(Price::from_cents(Price::MAX_CENTS + 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest unit price accepted from input, in cents ($999,999,999.99).
    pub const MAX_CENTS: i64 = 99_999_999_999;

    /// Create a price from a decimal amount, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    /// Returns `PriceError::OutOfRange` if the amount is above [`Self::MAX_CENTS`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let amount = amount.round_dp(2);
        if amount > Decimal::new(Self::MAX_CENTS, 2) {
            return Err(PriceError::OutOfRange);
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `cents` is below zero.
    /// Returns `PriceError::OutOfRange` if `cents` is above [`Self::MAX_CENTS`].
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative);
        }
        if cents > Self::MAX_CENTS {
            return Err(PriceError::OutOfRange);
        }
        Ok(Self(Decimal::new(cents, 2)))
    }

    /// Create a price from an unsigned amount in cents. Never fails.
    #[must_use]
    pub fn from_unsigned_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Convert to an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the amount does not fit in an `i64`.
    pub fn to_cents(&self) -> Result<i64, PriceError> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.trunc().to_i64())
            .ok_or(PriceError::OutOfRange)
    }

    /// Returns the price of `qty` units at this unit price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the product overflows.
    pub fn times(self, qty: Quantity) -> Result<Self, PriceError> {
        self.0
            .checked_mul(Decimal::from(qty.get()))
            .map(Self)
            .ok_or(PriceError::OutOfRange)
    }

    /// Add two prices.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the sum overflows.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PriceError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(PriceError::OutOfRange)
    }

    /// Sum a sequence of prices. An empty sequence totals zero.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::OutOfRange` if the running total overflows.
    pub fn total<I>(prices: I) -> Result<Self, PriceError>
    where
        I: IntoIterator<Item = Self>,
    {
        prices
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

// Serialized through the decimal string so that 79.99 becomes the f64 nearest
// to 79.99 rather than an accumulated binary approximation.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self
            .0
            .to_string()
            .parse::<f64>()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let amount = Decimal::from_str(&value.to_string()).map_err(serde::de::Error::custom)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
