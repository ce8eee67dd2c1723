//! # Money Module
//!
//! Provides the `Money` type for euro amounts and the `DiscountRate` applied
//! by promotion codes.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    59.9 * 3 = 179.70000000000002  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    5990 cents * 3 = 17970 cents = 179.70€                              │
//! │                                                                         │
//! │  Discounts are basis points: 2000 bps = 20%, exactly.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use constantine_core::money::{DiscountRate, Money};
//!
//! let subtotal = Money::from_euros(100);
//! let total = subtotal.apply_discount(DiscountRate::from_bps(2000));
//! assert_eq!(total, Money::from_euros(80));
//! assert_eq!(total.to_string(), "80.00€");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartLine (× quantity) ──► subtotal
///                                                      │
///                                   DiscountRate ──────┤
///                                                      ▼
///                                                    total ──► QuoteRecord
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use constantine_core::money::Money;
    ///
    /// let price = Money::from_cents(5990); // 59.90€
    /// assert_eq!(price.cents(), 5990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole euros.
    #[inline]
    pub const fn from_euros(euros: i64) -> Self {
        Money(euros * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ```rust
    /// use constantine_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4500);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 13500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Applies a percentage discount and returns the amount left to pay.
    ///
    /// `total = amount × (1 − rate)`, rounded half away from zero to the cent.
    ///
    /// ```rust
    /// use constantine_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_cents(4550); // 45.50€
    /// let total = subtotal.apply_discount(DiscountRate::from_bps(2000));
    /// assert_eq!(total.cents(), 3640); // 36.40€
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        let kept_bps = i128::from(BPS_PER_UNIT.saturating_sub(rate.bps()));
        let scaled = i128::from(self.0) * kept_bps;
        let half = i128::from(BPS_PER_UNIT / 2);
        // Integer division truncates toward zero, so bias away from zero first.
        let rounded = if scaled >= 0 {
            (scaled + half) / i128::from(BPS_PER_UNIT)
        } else {
            (scaled - half) / i128::from(BPS_PER_UNIT)
        };
        Money::from_cents(rounded as i64)
    }

    /// The part of `self` taken off by `rate`.
    ///
    /// Always equals `self - self.apply_discount(rate)` so the displayed
    /// discount line and the total add back up to the subtotal.
    pub fn discount_portion(&self, rate: DiscountRate) -> Money {
        *self - self.apply_discount(rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the storefront prints it: `59.90€`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}€", sign, self.euros().abs(), self.cents_part())
    }
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

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount fraction in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (`NDRC20`), 9900 bps = 99% (`INSTANTANIMAL`).
/// Promotion rates live in `[0, 10000)`: a promotion never makes an order free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a whole percentage.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(BPS_PER_UNIT)
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Shows the rate as the drawer's "Remise (-20%)" label does.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_parts() {
        let money = Money::from_cents(5990);
        assert_eq!(money.cents(), 5990);
        assert_eq!(money.euros(), 59);
        assert_eq!(money.cents_part(), 90);
        assert_eq!(Money::from_euros(120).cents(), 12000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(5990).to_string(), "59.90€");
        assert_eq!(Money::from_cents(500).to_string(), "5.00€");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50€");
        assert_eq!(Money::zero().to_string(), "0.00€");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_twenty_percent_of_one_hundred() {
        let total = Money::from_euros(100).apply_discount(DiscountRate::from_bps(2000));
        assert_eq!(total.cents(), 8000);
    }

    #[test]
    fn test_discount_rounds_half_up_on_cents() {
        // 0.05€ × 0.5 = 0.025€ → 0.03€
        let total = Money::from_cents(5).apply_discount(DiscountRate::from_percent(50));
        assert_eq!(total.cents(), 3);
        assert_eq!(Money::from_cents(5).discount_portion(DiscountRate::from_percent(50)).cents(), 2);
    }

    #[test]
    fn test_ninety_nine_percent() {
        let subtotal = Money::from_cents(13500);
        let total = subtotal.apply_discount(DiscountRate::from_bps(9900));
        assert_eq!(total.cents(), 135);
        assert_eq!(subtotal.discount_portion(DiscountRate::from_bps(9900)).cents(), 13365);
    }

    #[test]
    fn test_zero_rate_keeps_amount() {
        let subtotal = Money::from_cents(4599);
        assert_eq!(subtotal.apply_discount(DiscountRate::zero()), subtotal);
        assert!(subtotal.discount_portion(DiscountRate::zero()).is_zero());
    }

    #[test]
    fn test_rate_display_and_fraction() {
        assert_eq!(DiscountRate::from_bps(2000).to_string(), "20%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.50%");
        assert!((DiscountRate::from_bps(2000).fraction() - 0.20).abs() < f64::EPSILON);
        assert!(DiscountRate::default().is_zero());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }
}
