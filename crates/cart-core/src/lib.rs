//! # cart-core: Pure Cart Logic
//!
//! This crate contains the shopping cart and its discount policies as pure
//! functions over owned values, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Workspace                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cart-cli (binary)                            │   │
//! │  │    env + args ──► CliConfig ──► session ──► stdout / stderr    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut Cart                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ discount  │  │ receipt   │  │   │
//! │  │   │   Money   │  │   Cart    │  │  Policy   │  │  Receipt  │  │   │
//! │  │   │  parse    │  │ LineItem  │  │   Rate    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER MONEY                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart manager and line items
//! - [`discount`] - Discount policies and rates
//! - [`receipt`] - Text rendering of a cart
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Cart, DiscountPolicy, DiscountRate, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_product("Apple", Money::parse("1.04").unwrap(), 3).unwrap();
//! cart.add_product("Orange", Money::parse("1.20").unwrap(), 2).unwrap();
//! assert_eq!(cart.total().amount_string(), "5.52");
//!
//! cart.set_discount_policy(DiscountPolicy::Percentage(DiscountRate::from_percent(10).unwrap()));
//! assert_eq!(cart.total().amount_string(), "4.97");
//!
//! cart.set_discount_policy(DiscountPolicy::NoDiscount);
//! assert_eq!(cart.total().amount_string(), "5.52");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod receipt;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary, LineItem};
pub use discount::{DiscountPolicy, DiscountRate};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{receipt, Receipt};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typos like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price in cents ($1,000,000.00).
///
/// `MAX_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS` stays far inside
/// i64, so a cart that passed validation can always be totalled.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
