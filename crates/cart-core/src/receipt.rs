//! # Receipt Rendering
//!
//! Human-readable text view of a cart.
//!
//! ## Layout
//! ```text
//! Apple                      $1.04 x 3        $3.12
//! Orange                     $1.20 x 2        $2.40
//! -------------------------------------------------
//! Subtotal                                    $5.52
//! Discount (10% off)                         -$0.55
//! Total                                       $4.97
//! ```
//!
//! Lines follow insertion order. The discount line only appears when the
//! active policy actually took something off.

use std::fmt;

use crate::cart::Cart;
use crate::money::Money;

const NAME_WIDTH: usize = 24;
const PRICE_WIDTH: usize = 8;
const QTY_WIDTH: usize = 4;
const AMOUNT_WIDTH: usize = 10;
const LINE_WIDTH: usize = NAME_WIDTH + PRICE_WIDTH + 3 + QTY_WIDTH + AMOUNT_WIDTH;
const LABEL_WIDTH: usize = LINE_WIDTH - AMOUNT_WIDTH;

/// Borrowed view of a cart that renders as a receipt via `Display`.
///
/// ## Example
/// ```rust
/// use cart_core::{receipt, Cart, Money};
///
/// let mut cart = Cart::new();
/// cart.add_product("Apple", Money::from_cents(104), 3).unwrap();
///
/// let text = receipt(&cart).to_string();
/// assert!(text.contains("Apple"));
/// assert!(text.ends_with("$3.12\n"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    cart: &'a Cart,
}

/// Creates a receipt view of `cart`.
pub fn receipt(cart: &Cart) -> Receipt<'_> {
    Receipt { cart }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cart = self.cart;

        if cart.is_empty() {
            writeln!(f, "(empty)")?;
        }

        for item in cart.items() {
            writeln!(
                f,
                "{:<name$}{:>price$} x {:<qty$}{:>amount$}",
                item.name,
                item.unit_price,
                item.quantity,
                item.line_total(),
                name = NAME_WIDTH,
                price = PRICE_WIDTH,
                qty = QTY_WIDTH,
                amount = AMOUNT_WIDTH,
            )?;
        }

        writeln!(f, "{}", "-".repeat(LINE_WIDTH))?;
        write_total_line(f, "Subtotal", cart.subtotal())?;

        let discount = cart.discount();
        if !discount.is_zero() {
            let label = format!("Discount ({})", cart.discount_policy());
            write_total_line(f, &label, Money::zero() - discount)?;
        }

        write_total_line(f, "Total", cart.total())
    }
}

fn write_total_line(f: &mut fmt::Formatter<'_>, label: &str, amount: Money) -> fmt::Result {
    writeln!(
        f,
        "{:<label_w$}{:>amount_w$}",
        label,
        amount,
        label_w = LABEL_WIDTH,
        amount_w = AMOUNT_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiscountPolicy, DiscountRate};

    fn total_line(label: &str, amount: &str) -> String {
        format!("{:<39}{:>10}", label, amount)
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_product("Apple", Money::from_cents(104), 3).unwrap();
        cart.add_product("Orange", Money::from_cents(120), 2).unwrap();
        cart
    }

    #[test]
    fn test_lists_items_in_order() {
        let text = receipt(&sample_cart()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Apple"));
        assert!(lines[0].contains("$1.04 x 3"));
        assert!(lines[0].ends_with("$3.12"));
        assert!(lines[1].starts_with("Orange"));
        assert!(lines[1].contains("$1.20 x 2"));
        assert!(lines[1].ends_with("$2.40"));
        assert_eq!(lines[2], "-".repeat(49));
    }

    #[test]
    fn test_totals_without_discount() {
        let text = receipt(&sample_cart()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], total_line("Subtotal", "$5.52"));
        assert_eq!(lines[4], total_line("Total", "$5.52"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn test_totals_with_discount() {
        let mut cart = sample_cart();
        cart.set_discount_policy(DiscountPolicy::Percentage(DiscountRate::from_bps(1000)));

        let text = receipt(&cart).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[4], total_line("Discount (10% off)", "-$0.55"));
        assert_eq!(lines[5], total_line("Total", "$4.97"));
    }

    #[test]
    fn test_empty_cart() {
        let text = receipt(&Cart::new()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "(empty)");
        assert_eq!(lines.last().copied(), Some(total_line("Total", "$0.00").as_str()));
    }

    #[test]
    fn test_zero_rate_shows_no_discount_line() {
        let mut cart = sample_cart();
        cart.set_discount_policy(DiscountPolicy::Percentage(DiscountRate::zero()));
        assert!(!receipt(&cart).to_string().contains("Discount"));
    }
}
