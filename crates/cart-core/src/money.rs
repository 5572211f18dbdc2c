//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    1.04 × 3 = 3.1200000000000006  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    104 cents × 3 = 312 cents  → "3.12"                                  │
//! │    Discounts round to the cent exactly once, at the point they apply    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(104); // $1.04
//!
//! // Or parse a decimal string
//! let same = Money::parse("1.04").unwrap();
//! assert_eq!(price, same);
//!
//! // Arithmetic operations
//! let tripled = price.multiply_quantity(3); // $3.12
//! assert_eq!(tripled.amount_string(), "3.12");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as discount amounts may go negative
///   mid-calculation; the cart clamps the final total at zero
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Serializes as a bare integer of cents
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price ──► LineItem.line_total ──► Cart.subtotal          │
/// │                                                       │                 │
/// │                                    DiscountPolicy ◄───┘                 │
/// │                                          │                              │
/// │                                          ▼                              │
/// │                                     Cart.total ──► "4.97" on receipt    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"1.04"`, `"$12"` or `"-0.5"`.
    ///
    /// At most two fractional digits are accepted; anything finer than a
    /// cent is rejected rather than silently rounded.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.04").unwrap().cents(), 104);
    /// assert_eq!(Money::parse("1.5").unwrap().cents(), 150);
    /// assert_eq!(Money::parse("$12").unwrap().cents(), 1200);
    /// assert!(Money::parse("1.045").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Money> {
        parse_hundredths(input, "amount").map(Money)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(104); // $1.04
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 312); // $3.12
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount amount is rounded half-up to the cent before being
    /// subtracted: `(amount * bps + 5000) / 10000`.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(552); // $5.52
    /// let discounted = subtotal.apply_percentage_discount(1000); // 10% off
    /// // $5.52 × 0.9 = $4.968 → $4.97
    /// assert_eq!(discounted.cents(), 497);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // i128 keeps the intermediate product from overflowing on large totals
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_i128_saturating(self.0 as i128 - discount_amount)
    }

    /// Subtracts `other`, saturating at the i64 bounds instead of wrapping.
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    fn from_i128_saturating(cents: i128) -> Money {
        Money(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Returns the plain two-decimal amount without currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(497).amount_string(), "4.97");
    /// assert_eq!(Money::from_cents(-50).amount_string(), "-0.50");
    /// assert_eq!(Money::zero().amount_string(), "0.00");
    /// ```
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Parses a non-scientific decimal with at most two fractional digits into
/// an integer count of hundredths. `"12.5"` → `1250`.
///
/// Shared by money amounts (hundredths of a dollar) and percentages
/// (hundredths of a percent, i.e. basis points).
pub(crate) fn parse_hundredths(input: &str, field: &str) -> ValidationResult<i64> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = rest.strip_prefix('$').unwrap_or(rest);

    let (major, minor) = digits.split_once('.').unwrap_or((digits, ""));
    if major.is_empty() && minor.is_empty() {
        return Err(invalid("must be a decimal number"));
    }
    if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must be a decimal number"));
    }
    if minor.len() > 2 {
        return Err(invalid("at most two decimal places are allowed"));
    }

    let major: i64 = if major.is_empty() {
        0
    } else {
        major.parse().map_err(|_| invalid("value is too large"))?
    };
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
        _ => minor.parse().map_err(|_| invalid("must be a decimal number"))?,
    };

    let hundredths = major
        .checked_mul(100)
        .and_then(|v| v.checked_add(minor))
        .ok_or_else(|| invalid("value is too large"))?;

    Ok(if negative { -hundredths } else { hundredths })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as `$4.97` / `-$0.55`.
///
/// Honors width and alignment flags so receipt columns line up.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        f.pad(&format!(
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        ))
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
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

// =============================================================================
// Unit Tests
// =============================================================================
