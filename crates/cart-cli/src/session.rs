//! # Cart Session
//!
//! The scripted shopping session the `cart` binary replays.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. add Apple x3, Orange x2        → $5.52                              │
//! │  2. remove Orange                  → $3.12                              │
//! │  3. clear                          → $0.00                              │
//! │  4. add Peaches x5, Apple x3       → $8.22                              │
//! │  5. switch to percentage discount  → $7.40 (at 10%)                     │
//! │  6. switch back to no discount     → $8.22                              │
//! │  7. clear                          → $0.00                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step captures a `CartSummary` and the rendered receipt, so the
//! caller decides how to print them.

use cart_core::{receipt, Cart, CartSummary, CoreResult, DiscountPolicy, Money};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};

/// A catalog entry the session adds to the cart.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub name: &'static str,
    pub price: Money,
}

pub const APPLE: Product = Product {
    name: "Apple",
    price: Money::from_cents(104),
};

pub const ORANGE: Product = Product {
    name: "Orange",
    price: Money::from_cents(120),
};

pub const PEACHES: Product = Product {
    name: "Peaches",
    price: Money::from_cents(102),
};

/// Cart state captured after one session step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: String,
    pub summary: CartSummary,
    #[serde(skip)]
    pub receipt: String,
}

impl Step {
    fn capture(title: impl Into<String>, cart: &Cart) -> Self {
        let step = Step {
            title: title.into(),
            summary: CartSummary::from(cart),
            receipt: receipt(cart).to_string(),
        };
        info!(
            step = %step.title,
            items = step.summary.item_count,
            total = %cart.total(),
            "Cart updated"
        );
        step
    }
}

fn add(cart: &mut Cart, product: Product, quantity: i64) -> CoreResult<()> {
    debug!(product = product.name, price = %product.price, quantity, "add_product");
    cart.add_product(product.name, product.price, quantity)
}

fn remove(cart: &mut Cart, product: Product) {
    let removed = cart.remove_product(product.name);
    debug!(product = product.name, removed, "remove_product");
}

fn clear(cart: &mut Cart) {
    debug!(items = cart.item_count(), "clear");
    cart.clear();
}

fn set_policy(cart: &mut Cart, policy: DiscountPolicy) {
    let previous = cart.set_discount_policy(policy);
    debug!(%previous, current = %policy, "set_discount_policy");
}

/// Runs the scripted session against a fresh cart.
pub fn run_session(config: &CliConfig) -> CoreResult<Vec<Step>> {
    let mut cart = Cart::new();
    let mut steps = Vec::with_capacity(7);

    add(&mut cart, APPLE, 3)?;
    add(&mut cart, ORANGE, 2)?;
    steps.push(Step::capture("Added apples and oranges", &cart));

    remove(&mut cart, ORANGE);
    steps.push(Step::capture("Removed oranges", &cart));

    clear(&mut cart);
    steps.push(Step::capture("Cleared cart", &cart));

    add(&mut cart, PEACHES, 5)?;
    add(&mut cart, APPLE, 3)?;
    steps.push(Step::capture("Added peaches and apples", &cart));

    let discount = DiscountPolicy::Percentage(config.discount_rate);
    set_policy(&mut cart, discount);
    steps.push(Step::capture(format!("Applied {}", discount), &cart));

    set_policy(&mut cart, DiscountPolicy::NoDiscount);
    steps.push(Step::capture("Removed discount", &cart));

    clear(&mut cart);
    steps.push(Step::capture("Cleared cart", &cart));

    Ok(steps)
}

/// Renders session steps in the requested format.
pub fn render_steps(steps: &[Step], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => {
            let blocks: Vec<String> = steps
                .iter()
                .map(|step| format!("== {} ==\n{}", step.title, step.receipt))
                .collect();
            Ok(blocks.join("\n"))
        }
        OutputFormat::Json => serde_json::to_string_pretty(steps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::DiscountRate;

    fn totals(steps: &[Step]) -> Vec<i64> {
        steps.iter().map(|s| s.summary.total_cents).collect()
    }

    #[test]
    fn test_default_session_totals() {
        let steps = run_session(&CliConfig::default()).unwrap();
        assert_eq!(totals(&steps), [552, 312, 0, 822, 740, 822, 0]);
    }

    #[test]
    fn test_session_step_titles() {
        let steps = run_session(&CliConfig::default()).unwrap();
        assert_eq!(steps[4].title, "Applied 10% off");
        assert_eq!(steps[5].title, "Removed discount");
    }

    #[test]
    fn test_removed_and_cleared_steps() {
        let steps = run_session(&CliConfig::default()).unwrap();

        let after_remove: Vec<&str> = steps[1]
            .summary
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(after_remove, ["Apple"]);
        assert!(steps[2].summary.items.is_empty());
        assert!(steps[6].summary.items.is_empty());
    }

    #[test]
    fn test_configured_discount() {
        let config = CliConfig {
            discount_rate: DiscountRate::from_bps(2500),
            ..CliConfig::default()
        };
        let steps = run_session(&config).unwrap();

        // $8.22 × 25% = $2.055 → $2.06 off
        assert_eq!(steps[4].summary.total_cents, 616);
        assert_eq!(steps[4].summary.discount_cents, 206);
        assert_eq!(steps[5].summary.total_cents, 822);
    }

    #[test]
    fn test_render_text() {
        let steps = run_session(&CliConfig::default()).unwrap();
        let text = render_steps(&steps, OutputFormat::Text).unwrap();

        assert!(text.starts_with("== Added apples and oranges ==\n"));
        assert!(text.contains("== Cleared cart ==\n(empty)\n"));
        assert!(text.contains("Discount (10% off)"));
        assert!(text.contains("$7.40"));
    }

    #[test]
    fn test_render_json() {
        let steps = run_session(&CliConfig::default()).unwrap();
        let json = render_steps(&steps, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 7);
        assert_eq!(array[3]["summary"]["totalCents"], 822);
        assert_eq!(array[4]["summary"]["discountPolicy"]["percentage"], 1000);
        assert!(array[0].get("receipt").is_none());
    }
}
