//! # Discount Policies
//!
//! Pluggable rules that turn a cart subtotal into the charged total.
//!
//! ## Policy Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DiscountPolicy                                     │
//! │                                                                         │
//! │  subtotal ──►  NoDiscount          ──► subtotal                         │
//! │           ──►  Percentage(10%)     ──► subtotal − round(subtotal × 10%) │
//! │           ──►  FixedAmount($2.00)  ──► max(subtotal − $2.00, $0.00)     │
//! │                                                                         │
//! │  Every result is clamped at $0.00: a policy can never make the cart    │
//! │  owe the customer money.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The policy is a plain value held by the cart. Swapping it is an
//! assignment; it never touches the line items.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{parse_hundredths, Money};
use crate::validation::{validate_discount_rate_bps, ValidationResult};
use crate::error::ValidationError;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 12.5% is exactly 1250 bps and the
/// arithmetic stays in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points, rejecting anything above 100%.
    pub fn new(bps: u32) -> ValidationResult<Self> {
        validate_discount_rate_bps(bps)?;
        Ok(DiscountRate(bps))
    }

    /// Creates a rate from basis points without range checking.
    ///
    /// Rates above 100% are still safe to apply: the policy clamps the
    /// result at zero.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (10 → 10%).
    pub fn from_percent(percent: u32) -> ValidationResult<Self> {
        let bps = percent.checked_mul(100).ok_or_else(|| ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        })?;
        Self::new(bps)
    }

    /// Parses a percentage such as `"10"`, `"12.5"` or `"7.25%"`.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::discount::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::parse_percent("10").unwrap().bps(), 1000);
    /// assert_eq!(DiscountRate::parse_percent("12.5%").unwrap().bps(), 1250);
    /// assert!(DiscountRate::parse_percent("150").is_err());
    /// assert!(DiscountRate::parse_percent("-5").is_err());
    /// ```
    pub fn parse_percent(input: &str) -> ValidationResult<Self> {
        let trimmed = input.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
        if number.trim_start().starts_with('$') {
            return Err(ValidationError::InvalidFormat {
                field: "discount".to_string(),
                reason: "must be a percentage".to_string(),
            });
        }

        let bps = parse_hundredths(number, "discount")?;
        let bps = u32::try_from(bps).map_err(|_| ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        })?;
        Self::new(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero discount rate.
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

/// Shows the rate as a percentage: `10%`, `12.5%`, `7.25%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// The rule applied to the cart subtotal when computing the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Charge the subtotal as-is.
    #[default]
    NoDiscount,
    /// Take a percentage off the subtotal.
    Percentage(DiscountRate),
    /// Take a flat amount off the subtotal.
    FixedAmount(Money),
}

impl DiscountPolicy {
    /// Maps a subtotal to the charged total. Never returns a negative value.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::discount::{DiscountPolicy, DiscountRate};
    /// use cart_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(552);
    ///
    /// assert_eq!(DiscountPolicy::NoDiscount.apply(subtotal), subtotal);
    ///
    /// let ten_off = DiscountPolicy::Percentage(DiscountRate::from_bps(1000));
    /// assert_eq!(ten_off.apply(subtotal).amount_string(), "4.97");
    ///
    /// let too_much = DiscountPolicy::FixedAmount(Money::from_cents(1000));
    /// assert!(too_much.apply(subtotal).is_zero());
    /// ```
    pub fn apply(&self, subtotal: Money) -> Money {
        let adjusted = match self {
            DiscountPolicy::NoDiscount => subtotal,
            DiscountPolicy::Percentage(rate) => subtotal.apply_percentage_discount(rate.bps()),
            DiscountPolicy::FixedAmount(amount) => subtotal.saturating_sub(*amount),
        };

        adjusted.max(Money::zero())
    }

    /// Checks if this policy leaves every subtotal unchanged.
    pub fn is_identity(&self) -> bool {
        match self {
            DiscountPolicy::NoDiscount => true,
            DiscountPolicy::Percentage(rate) => rate.is_zero(),
            DiscountPolicy::FixedAmount(amount) => amount.is_zero(),
        }
    }
}

/// Short label used on receipts: `no discount`, `10% off`, `$2.00 off`.
impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPolicy::NoDiscount => f.write_str("no discount"),
            DiscountPolicy::Percentage(rate) => write!(f, "{} off", rate),
            DiscountPolicy::FixedAmount(amount) => write!(f, "{} off", amount),
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
    fn test_rate_constructors() {
        assert_eq!(DiscountRate::new(1000).unwrap().bps(), 1000);
        assert!(DiscountRate::new(10001).is_err());
        assert_eq!(DiscountRate::from_percent(25).unwrap().bps(), 2500);
        assert!(DiscountRate::from_percent(101).is_err());
        assert!(DiscountRate::from_percent(u32::MAX).is_err());
        assert!(DiscountRate::zero().is_zero());
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(DiscountRate::parse_percent("0").unwrap().bps(), 0);
        assert_eq!(DiscountRate::parse_percent(" 7.25 % ").unwrap().bps(), 725);
        assert_eq!(DiscountRate::parse_percent("100").unwrap().bps(), 10000);

        assert!(DiscountRate::parse_percent("").is_err());
        assert!(DiscountRate::parse_percent("ten").is_err());
        assert!(DiscountRate::parse_percent("$5").is_err());
        assert!(DiscountRate::parse_percent("1.125").is_err());
        assert!(matches!(
            DiscountRate::parse_percent("-1"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.5%");
        assert_eq!(DiscountRate::from_bps(725).to_string(), "7.25%");
        assert_eq!(DiscountRate::from_bps(5).to_string(), "0.05%");
    }

    #[test]
    fn test_no_discount_is_identity() {
        let subtotal = Money::from_cents(822);
        assert_eq!(DiscountPolicy::default(), DiscountPolicy::NoDiscount);
        assert_eq!(DiscountPolicy::NoDiscount.apply(subtotal), subtotal);
        assert!(DiscountPolicy::NoDiscount.is_identity());
    }

    #[test]
    fn test_percentage_policy() {
        let policy = DiscountPolicy::Percentage(DiscountRate::from_bps(1000));
        assert_eq!(policy.apply(Money::from_cents(552)).cents(), 497);
        assert_eq!(policy.apply(Money::from_cents(822)).cents(), 740);
        assert!(policy.apply(Money::zero()).is_zero());
        assert!(!policy.is_identity());
    }

    #[test]
    fn test_out_of_range_rate_is_clamped() {
        let policy = DiscountPolicy::Percentage(DiscountRate::from_bps(15000));
        assert!(policy.apply(Money::from_cents(552)).is_zero());
    }

    #[test]
    fn test_fixed_amount_policy() {
        let policy = DiscountPolicy::FixedAmount(Money::from_cents(200));
        assert_eq!(policy.apply(Money::from_cents(552)).cents(), 352);
        assert!(policy.apply(Money::from_cents(150)).is_zero());
        assert!(DiscountPolicy::FixedAmount(Money::zero()).is_identity());
    }

    #[test]
    fn test_extreme_policies_do_not_overflow() {
        let subtotal = Money::from_cents(crate::MAX_PRICE_CENTS * 999);

        let fixed = DiscountPolicy::FixedAmount(Money::from_cents(i64::MAX));
        assert!(fixed.apply(subtotal).is_zero());

        let rate = DiscountPolicy::Percentage(DiscountRate::from_bps(u32::MAX));
        assert!(rate.apply(subtotal).is_zero());
    }

    #[test]
    fn test_policy_labels() {
        assert_eq!(DiscountPolicy::NoDiscount.to_string(), "no discount");
        assert_eq!(
            DiscountPolicy::Percentage(DiscountRate::from_bps(1000)).to_string(),
            "10% off"
        );
        assert_eq!(
            DiscountPolicy::FixedAmount(Money::from_cents(200)).to_string(),
            "$2.00 off"
        );
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&DiscountPolicy::NoDiscount).unwrap();
        assert_eq!(json, "\"no_discount\"");

        let json =
            serde_json::to_string(&DiscountPolicy::Percentage(DiscountRate::from_bps(1000)))
                .unwrap();
        assert_eq!(json, r#"{"percentage":1000}"#);

        let back: DiscountPolicy = serde_json::from_str(r#"{"fixed_amount":250}"#).unwrap();
        assert_eq!(back, DiscountPolicy::FixedAmount(Money::from_cents(250)));
    }
}
