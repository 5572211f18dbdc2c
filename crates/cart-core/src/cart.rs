//! # Cart
//!
//! The cart manager: distinct named line items plus the active discount
//! policy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                         State Change                         │
//! │  ─────────                         ────────────                         │
//! │                                                                         │
//! │  add_product("Apple", $1.04, 3) ─► new line Apple x3                    │
//! │  add_product("Apple", $9.99, 2) ─► Apple x5 (first-seen price kept)     │
//! │  remove_product("Orange") ───────► no-op if absent                      │
//! │  clear() ────────────────────────► items emptied, policy kept           │
//! │  set_discount_policy(p) ─────────► next total() uses p                  │
//! │  total() ────────────────────────► (read only)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! There is no process-wide cart. Callers construct a `Cart`, own it, and
//! hand out `&mut Cart` to whatever needs to mutate it. Sharing one cart
//! across threads means wrapping it in a lock at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discount::DiscountPolicy;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

// =============================================================================
// Line Item
// =============================================================================

/// A named product entry in the cart.
///
/// ## Price Freezing
/// The unit price is captured when the name is first added. Later adds of
/// the same name only bump the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name; the identity key within a cart.
    pub name: String,

    /// Price per unit (frozen at first add).
    #[serde(rename = "unitPriceCents")]
    pub unit_price: Money,

    /// Quantity in cart (always > 0).
    pub quantity: i64,

    /// When this name was first added.
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    fn new(name: &str, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            name: name.to_string(),
            unit_price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `name` (adding the same name increases quantity)
/// - Every quantity is in 1..=999
/// - At most 100 distinct items
/// - `total()` is never negative
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    discount_policy: DiscountPolicy,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with no discount.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            discount_policy: DiscountPolicy::NoDiscount,
            created_at: Utc::now(),
        }
    }

    /// Creates a new empty cart with the given discount policy.
    pub fn with_discount_policy(policy: DiscountPolicy) -> Self {
        Cart {
            discount_policy: policy,
            ..Cart::new()
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Name already in cart: quantity increases, `unit_price` is ignored
    /// - Name not in cart: appended as a new line
    /// - Leading/trailing whitespace in `name` is not part of the key
    ///
    /// ## Errors
    /// Nothing is modified when an error is returned.
    /// - `Validation` for an empty name, a price outside 0..=$1,000,000.00,
    ///   or quantity <= 0
    /// - `QuantityTooLarge` if the accumulated quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed 100 distinct items
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::{Cart, Money};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_product("Apple", Money::from_cents(104), 3).unwrap();
    /// cart.add_product("Apple", Money::from_cents(104), 2).unwrap();
    ///
    /// assert_eq!(cart.item_count(), 1);
    /// assert_eq!(cart.get("Apple").unwrap().quantity, 5);
    /// ```
    pub fn add_product(&mut self, name: &str, unit_price: Money, quantity: i64) -> CoreResult<()> {
        validate_product_name(name)?;
        validate_price(unit_price)?;
        validate_quantity(quantity)?;

        let name = name.trim();

        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(LineItem::new(name, unit_price, quantity));
        Ok(())
    }

    /// Removes the line matching `name`, if any.
    ///
    /// Returns `true` when a line was removed. Removing an absent name is a
    /// no-op, not an error.
    pub fn remove_product(&mut self, name: &str) -> bool {
        let name = name.trim();
        let initial_len = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart. The discount policy is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Replaces the active discount policy, returning the previous one.
    pub fn set_discount_policy(&mut self, policy: DiscountPolicy) -> DiscountPolicy {
        std::mem::replace(&mut self.discount_policy, policy)
    }

    /// Returns the active discount policy.
    pub fn discount_policy(&self) -> DiscountPolicy {
        self.discount_policy
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        let name = name.trim();
        self.items.iter().find(|i| i.name == name)
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of line totals, before discount.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Amount taken off by the active policy (`subtotal - total`).
    pub fn discount(&self) -> Money {
        self.subtotal() - self.total()
    }

    /// Calculates the charged total: subtotal with the active policy applied.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::{Cart, DiscountPolicy, DiscountRate, Money};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_product("Apple", Money::from_cents(104), 3).unwrap();
    /// cart.add_product("Orange", Money::from_cents(120), 2).unwrap();
    /// assert_eq!(cart.total().amount_string(), "5.52");
    ///
    /// cart.set_discount_policy(DiscountPolicy::Percentage(DiscountRate::from_bps(1000)));
    /// assert_eq!(cart.total().amount_string(), "4.97");
    /// ```
    pub fn total(&self) -> Money {
        self.discount_policy.apply(self.subtotal())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Serializable snapshot of a cart: items plus calculated totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub discount_policy: DiscountPolicy,
    pub created_at: DateTime<Utc>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            items: cart.items.clone(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            discount_policy: cart.discount_policy,
            created_at: cart.created_at(),
            subtotal_cents: cart.subtotal().cents(),
            discount_cents: cart.discount().cents(),
            total_cents: cart.total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
