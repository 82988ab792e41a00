//! Decimal money amounts.
//!
//! All prices are stored as `NUMERIC(10, 2)` and handled as [`Decimal`] so
//! that cart totals never drift the way floating point sums do.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Money`] amount from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input is not a decimal number.
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
}

/// A non-currency-aware amount in the store's single currency.
///
/// Displays with a dollar sign and two decimal places.
///
/// ```
/// use foodia_core::Money;
///
/// let price = Money::from_cents(1250);
/// assert_eq!(price.to_string(), "$12.50");
/// assert_eq!((price * 2).to_string(), "$25.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a user-entered amount such as `"12.5"` or `"$3.00"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a number or is negative.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim().trim_start_matches('$').trim();
        let amount: Decimal = trimmed
            .parse()
            .map_err(|_| MoneyError::Invalid(input.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// The underlying decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whole currency units, rounded down. Used for reward points.
    #[must_use]
    pub fn whole_units(&self) -> u32 {
        self.0.floor().to_u32().unwrap_or(0)
    }

    /// Divide evenly, returning zero when `count` is zero.
    #[must_use]
    pub fn average_over(&self, count: usize) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        Self((self.0 / Decimal::from(count)).round_dp(2))
    }

    /// Plain decimal text without the currency sign, for form inputs.
    #[must_use]
    pub fn to_input_value(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
