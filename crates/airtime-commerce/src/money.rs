//! Money type for rand-denominated amounts.
//!
//! The catalog and all profit splits are priced in South African rand, so
//! amounts are a cents-based integer rather than a float. This keeps the
//! allocation invariant ("populated fields sum to the markup, to the cent")
//! checkable with exact equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A rand amount stored in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in cents.
    pub cents: i64,
}

impl Money {
    /// Create a Money value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from a decimal rand amount.
    ///
    /// ```
    /// use airtime_commerce::money::Money;
    /// let price = Money::from_rands(49.99);
    /// assert_eq!(price.cents, 4999);
    /// ```
    pub fn from_rands(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// Zero rand.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Convert to a decimal rand value.
    pub fn to_rands(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Checked addition.
    pub fn try_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Checked subtraction.
    pub fn try_sub(&self, other: Money) -> Option<Money> {
        self.cents.checked_sub(other.cents).map(Money::from_cents)
    }

    /// Checked multiplication by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.cents.checked_mul(factor).map(Money::from_cents)
    }

    /// Calculate a percentage of this amount, rounded to the nearest cent.
    ///
    /// ```
    /// use airtime_commerce::money::Money;
    /// let price = Money::from_rands(90.00);
    /// assert_eq!(price.percentage(2.5), Money::from_rands(2.25));
    /// ```
    pub fn percentage(&self, percent: f64) -> Money {
        Money::from_cents((self.cents as f64 * percent / 100.0).round() as i64)
    }

    /// Clamp into the `[zero, max]` range.
    pub fn clamp_to(&self, max: Money) -> Money {
        Money::from_cents(self.cents.clamp(0, max.cents.max(0)))
    }

    /// Format as a display string (e.g., "R49.99").
    pub fn display(&self) -> String {
        if self.cents < 0 {
            format!("-R{:.2}", -self.to_rands())
        } else {
            format!("R{:.2}", self.to_rands())
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.cents + other.cents)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_cents(self.cents - other.cents)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
