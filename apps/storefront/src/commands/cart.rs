//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                        place_order        │
//! │                   increment_item                     (checkout.rs)      │
//! │                   decrement_item                          │             │
//! │                   remove_from_cart                        ▼             │
//! │                                                    (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{LineItem, PriceSummary};
use tracing::debug;

use crate::error::ApiError;
use crate::state::Storefront;

/// Cart drawer snapshot: lines, totals and coupon state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub summary: PriceSummary,

    /// Coupon field text as typed (uppercased)
    pub coupon_code: String,

    /// Label of the applied coupon, if any
    pub applied_label: Option<String>,

    /// Units across all lines (the navbar badge)
    pub badge_count: u64,

    pub cart_open: bool,
}

impl Storefront {
    /// Immutable snapshot of everything the cart drawer shows.
    pub fn snapshot(&mut self) -> CartResponse {
        let summary = self.summary();

        CartResponse {
            items: self.cart().lines().to_vec(),
            summary,
            coupon_code: self.coupon_code().to_string(),
            applied_label: self.applied_coupon().map(|c| c.label.clone()),
            badge_count: self.cart().total_quantity(),
            cart_open: self.view().cart_open,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &mut Storefront) -> CartResponse {
    debug!("get_cart command");
    store.snapshot()
}

/// Adds one unit of a product to the cart and opens the drawer.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: appended with quantity 1
/// - Name and price are "frozen" at time of adding
///
/// ## Errors
/// `NOT_FOUND` when `product_id` is not on the menu.
pub fn add_to_cart(store: &mut Storefront, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let quantity = store.add_to_cart(product_id)?.quantity;
    debug!(product_id = %product_id, quantity, "Cart line updated");

    Ok(store.snapshot())
}

/// Adds one unit to a line already in the cart. Unknown ids are ignored.
pub fn increment_item(store: &mut Storefront, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "increment_item command");
    store.increment(product_id);
    store.snapshot()
}

/// Removes one unit; the line disappears at zero. Unknown ids are ignored.
pub fn decrement_item(store: &mut Storefront, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "decrement_item command");
    store.decrement(product_id);
    store.snapshot()
}

/// Drops a line whatever its quantity. Unknown ids are ignored.
pub fn remove_from_cart(store: &mut Storefront, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    store.remove(product_id);
    store.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::Money;

    #[test]
    fn test_add_returns_snapshot() {
        let mut store = Storefront::default();
        add_to_cart(&mut store, "p1").unwrap();
        let cart = add_to_cart(&mut store, "p1").unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.badge_count, 2);
        assert_eq!(cart.summary.subtotal, Money::from_cents(59800));
        assert!(cart.cart_open);
        assert_eq!(cart.applied_label, None);
    }

    #[test]
    fn test_add_unknown_is_not_found() {
        let mut store = Storefront::default();
        let err = add_to_cart(&mut store, "p0").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_increment_decrement_remove() {
        let mut store = Storefront::default();
        add_to_cart(&mut store, "p3").unwrap();
        add_to_cart(&mut store, "p6").unwrap();

        assert_eq!(increment_item(&mut store, "p3").badge_count, 3);
        assert_eq!(decrement_item(&mut store, "p6").items.len(), 1);
        assert_eq!(decrement_item(&mut store, "p6").badge_count, 2);

        let cart = remove_from_cart(&mut store, "p3");
        assert!(cart.items.is_empty());
        assert_eq!(cart.summary.total, Money::zero());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = Storefront::default();
        let before = get_cart(&mut store);
        add_to_cart(&mut store, "p2").unwrap();

        assert!(before.items.is_empty());
        assert_eq!(get_cart(&mut store).items.len(), 1);
    }
}
