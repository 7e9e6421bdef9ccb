//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All prices in Antojo — menu prices, extra-topping charges, delivery fees,
//! order totals — are integer cents. Floating point never touches price
//! math; only the frontend converts cents for display.
//!
//! ## Usage
//! ```rust
//! use antojo_core::money::Money;
//!
//! let bowl = Money::from_cents(3000);          // $30.00
//! let extras = Money::from_cents(500) * 2;     // two extras at $5.00
//! assert_eq!((bowl + extras).cents(), 4000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that refunds and corrections can be represented; the pricing
/// rules themselves reject negative configured prices before any charge is
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use antojo_core::money::Money;
    ///
    /// let price = Money::from_cents(3000); // $30.00
    /// assert_eq!(price.cents(), 3000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use antojo_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(3000);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 9000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and debugging. The frontend formats cents itself to
/// handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line subtotals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(3050);
        assert_eq!(money.cents(), 3050);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(3050)), "$30.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(3000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 3500);
        assert_eq!((a - b).cents(), 2500);
        assert_eq!((b * 3).cents(), 1500);
        assert_eq!(b.multiply_quantity(4).cents(), 2000);
    }

    #[test]
    fn test_sum() {
        let lines = vec![
            Money::from_cents(3000),
            Money::from_cents(4000),
            Money::from_cents(500),
        ];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total.cents(), 7500);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
