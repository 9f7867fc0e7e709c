//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1.005 * 100 = 100.49999999999999  → toFixed(2) gives "1.00"  ❌      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise + Decimal intermediates                    │
//! │    rate × quantity is computed in rust_decimal, then rounded ONCE       │
//! │    (half-up) into whole paise. Every stored amount is exact.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Persisted invoices (and the browser UI) carry amounts as JSON numbers in
//! rupees: `1180.5`. Deserialization is lenient: numeric strings are parsed,
//! anything else becomes zero.
//!
//! Arithmetic saturates at the `i64` bounds, so oversized stored amounts
//! clamp instead of overflowing.
//!
//! ## Usage
//! ```rust
//! use gstbook_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let rate = Money::from_paise(100_000); // ₹1,000.00
//! let amount = rate.multiply_quantity(Decimal::new(15, 1)); // × 1.5
//! assert_eq!(amount.paise(), 150_000);
//! assert_eq!(amount.to_string(), "₹1,500.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::coerce;
use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored as a whole number of paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the amount yields a negative
///   taxable value, which must be representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Half-up rounding**: every conversion from a decimal rounds the
///   midpoint away from zero (₹0.005 → ₹0.01)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1180).paise(), 118_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Creates a Money value from a decimal rupee amount, rounding half-up
    /// to the nearest paisa.
    ///
    /// ```rust
    /// use gstbook_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// // 1.005 rupees → 1.01 (no float drift)
    /// assert_eq!(Money::from_decimal(Decimal::new(1005, 3)).paise(), 101);
    /// // -0.125 rupees → -0.13 (midpoint away from zero)
    /// assert_eq!(Money::from_decimal(Decimal::new(-125, 3)).paise(), -13);
    /// ```
    pub fn from_decimal(rupees: Decimal) -> Self {
        let paise = rupees
            .checked_mul(Decimal::ONE_HUNDRED)
            .unwrap_or_else(|| saturated(rupees.is_sign_negative()));
        Money(round_to_paise(paise))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a decimal number of rupees (scale 2).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit rate by a (possibly fractional) quantity, rounding
    /// the product half-up to paise.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Event Equipment Rental @ ₹1,000.00
    /// Quantity: 1
    ///      │
    ///      ▼
    /// multiply_quantity(1) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Amount: ₹1,000.00
    /// ```
    pub fn multiply_quantity(&self, quantity: Decimal) -> Money {
        let paise = Decimal::from(self.0)
            .checked_mul(quantity)
            .unwrap_or_else(|| saturated(self.is_negative() != quantity.is_sign_negative()));
        Money(round_to_paise(paise))
    }

    /// Applies a GST percentage to this amount, rounding half-up to paise.
    ///
    /// ```rust
    /// use gstbook_core::money::Money;
    /// use gstbook_core::types::GstRate;
    ///
    /// let taxable = Money::from_rupees(1000);
    /// assert_eq!(taxable.apply_rate(GstRate::from_percent(9)).paise(), 9_000);
    ///
    /// // ₹0.25 at 2.5% = ₹0.00625 → ₹0.01
    /// let small = Money::from_paise(25);
    /// let rate = "2.5".parse::<GstRate>().unwrap();
    /// assert_eq!(small.apply_rate(rate).paise(), 1);
    /// ```
    pub fn apply_rate(&self, rate: GstRate) -> Money {
        let paise = Decimal::from(self.0)
            .checked_mul(rate.percent())
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or_else(|| saturated(self.is_negative() != rate.percent().is_sign_negative()));
        Money(round_to_paise(paise))
    }

    /// Divides the amount evenly by `count`, rounding half-up to paise.
    /// Returns zero when `count` is zero.
    ///
    /// ```rust
    /// use gstbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(1000).divide_by(3).paise(), 333);
    /// assert_eq!(Money::from_paise(1000).divide_by(0), Money::zero());
    /// ```
    pub fn divide_by(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        let paise = Decimal::from(self.0)
            .checked_div(Decimal::from(count))
            .unwrap_or(Decimal::ZERO);
        Money(round_to_paise(paise))
    }
}

/// The decimal bound an overflowing product clamps to.
fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Rounds a decimal paise value to a whole paisa, midpoint away from zero.
fn round_to_paise(paise: Decimal) -> i64 {
    let rounded = paise.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays money the way `Intl.NumberFormat('en-IN', { currency: 'INR' })`
/// does: lakh/crore digit grouping and two decimals.
///
/// ```rust
/// use gstbook_core::money::Money;
///
/// assert_eq!(Money::from_paise(11_800_000).to_string(), "₹1,18,000.00");
/// assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = (self.0 / 100).unsigned_abs();
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            group_indian(rupees),
            self.paise_part()
        )
    }
}

/// Groups digits as 12,34,56,789: the last three digits, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialized as a JSON number of rupees (`1180.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        coerce::serialize_decimal(&self.to_decimal(), serializer)
    }
}

/// Accepts numbers, numeric strings, or null; non-numeric input is zero.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = coerce::deserialize_decimal(deserializer)?;
        Ok(Money::from_decimal(rupees))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
