//! # Money Module
//!
//! Monetary values as integer cents.
//!
//! The Remote Store API speaks decimal dollars (`"price": 24.99`), but all
//! arithmetic in this crate happens on `i64` cents: revenue totals are exact
//! sums, and the only float in the reporting path is the percentage computed
//! at the very edge. The custom serde impls below translate between the two
//! representations at the wire boundary.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Example
/// ```rust
/// use vulcan_core::Money;
///
/// let price = Money::from_cents(2499); // $24.99
/// let line = price * 3;
/// assert_eq!(line.cents(), 7497);
/// assert_eq!(line.to_string(), "$74.97");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars and a 0-99 cents part.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides evenly across `count` parts, truncating toward zero.
    ///
    /// Used for per-sale averages; the sub-cent remainder is dropped.
    /// Returns zero when `count` is zero.
    #[inline]
    pub const fn divide_by(&self, count: i64) -> Self {
        if count == 0 {
            Money(0)
        } else {
            Money(self.0 / count)
        }
    }

    /// This value as a share of `total`, in percent.
    ///
    /// Returns 0.0 when `total` is zero or negative.
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.0 <= 0 {
            0.0
        } else {
            self.0 as f64 / total.0 as f64 * 100.0
        }
    }

    /// The decimal-dollar representation used on the wire.
    #[inline]
    pub fn as_dollars_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Wire Representation
// =============================================================================
// The Remote Store serializes prices as JSON numbers in dollars. Cents are
// reconstructed with rounding so `24.99` survives the f64 round-trip.

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() {
            return Err(de::Error::custom("monetary amount must be finite"));
        }
        Ok(Money((dollars * 100.0).round() as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug/log formatting. UI-facing formatting is the presentation layer's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
