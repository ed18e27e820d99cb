//! # Cart Ledger
//!
//! The in-memory shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Shell Action             Ledger Operation        Cart Change           │
//! │  ────────────             ────────────────        ───────────           │
//! │                                                                         │
//! │  "Add" on menu card ─────► add(product) ────────► qty += 1 or push     │
//! │                                                                         │
//! │  "+" in drawer ──────────► increment(id) ───────► qty += 1             │
//! │                                                                         │
//! │  "−" in drawer ──────────► decrement(id) ───────► qty -= 1, drop at 0  │
//! │                                                                         │
//! │  "Remove" in drawer ─────► remove(id) ──────────► drop line            │
//! │                                                                         │
//! │  Order placed ───────────► clear() ─────────────► empty                │
//! │                                                                         │
//! │  NOTE: every operation is total. An unknown id is a silent no-op.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// One distinct product in the cart together with its quantity.
///
/// ## Snapshot Pattern
/// Name, price and image are copied from the product when it is first added,
/// so the cart renders consistently even if a menu is swapped underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product id (unique within a cart).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Image reference at time of adding (frozen).
    pub image_ref: String,

    /// Quantity in cart, always >= 1.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line with quantity 1 from a product.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image_ref: product.image_ref.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product bumps quantity)
/// - Every quantity is >= 1 (a line that would reach 0 is removed)
/// - Lines keep the order in which products were first added
/// - `revision` increases on every change to the contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    revision: u64,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            revision: 0,
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Product not in cart: new line with quantity 1, appended at the end
    ///
    /// Returns the affected line.
    pub fn add(&mut self, product: &Product) -> &LineItem {
        self.revision += 1;

        match self.position(&product.id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity = item.quantity.saturating_add(1);
                &self.items[idx]
            }
            None => {
                self.items.push(LineItem::from_product(product));
                &self.items[self.items.len() - 1]
            }
        }
    }

    /// Adds one unit to an existing line. No-op if `product_id` is absent.
    pub fn increment(&mut self, product_id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = item.quantity.saturating_add(1);
            self.revision += 1;
        }
    }

    /// Removes one unit from a line, dropping the line when it reaches zero.
    /// No-op if `product_id` is absent.
    pub fn decrement(&mut self, product_id: &str) {
        let Some(idx) = self.position(product_id) else {
            return;
        };

        if self.items[idx].quantity <= 1 {
            self.items.remove(idx);
        } else {
            self.items[idx].quantity -= 1;
        }
        self.revision += 1;
    }

    /// Drops a line regardless of quantity. No-op if `product_id` is absent.
    pub fn remove(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() != before {
            self.revision += 1;
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.revision += 1;
        self.created_at = Utc::now();
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks a line up by product id.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the navbar badge).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Change counter used to key memoized pricing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("{}.jpg", id),
            "test dish",
            None,
        )
    }

    #[test]
    fn test_add_same_product_twice_collapses() {
        let mut cart = Cart::new();
        let product = test_product("p1", 29900);

        cart.add(&product);
        let line = cart.add(&product);

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&test_product("b", 100));
        cart.add(&test_product("a", 100));
        cart.add(&test_product("b", 100));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_snapshots_product() {
        let mut cart = Cart::new();
        let line = cart.add(&test_product("p3", 17900)).clone();

        assert_eq!(line.name, "Product p3");
        assert_eq!(line.unit_price.cents(), 17900);
        assert_eq!(line.image_ref, "p3.jpg");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::new();
        cart.add(&test_product("p1", 100));
        cart.increment("p1");
        cart.increment("p1");

        assert_eq!(cart.get("p1").unwrap().quantity, 3);
    }

    #[test]
    fn test_increment_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("p1", 100));
        let revision = cart.revision();

        cart.increment("nope");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.revision(), revision);
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add(&test_product("p1", 100));
        cart.add(&test_product("p2", 100));
        cart.add(&test_product("p2", 100));

        cart.decrement("p2");
        assert_eq!(cart.get("p2").unwrap().quantity, 1);

        cart.decrement("p1");
        assert!(cart.get("p1").is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product("p1", 100));
        let revision = cart.revision();

        cart.decrement("p9");

        assert_eq!(cart.get("p1").unwrap().quantity, 1);
        assert_eq!(cart.revision(), revision);
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = Cart::new();
        let product = test_product("p1", 100);
        for _ in 0..5 {
            cart.add(&product);
        }

        cart.remove("p1");
        assert!(cart.is_empty());

        cart.remove("p1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product("p1", 100));
        let revision = cart.revision();

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.revision() > revision);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        let product = test_product("p4", 24900);
        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.get("p4").unwrap().line_total().cents(), 49800);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Increment(usize),
        Decrement(usize),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // index 4 is never on the menu, exercising the absent-id paths
        prop_oneof![
            (0..5usize).prop_map(Op::Add),
            (0..5usize).prop_map(Op::Increment),
            (0..5usize).prop_map(Op::Decrement),
            (0..5usize).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_lines_stay_unique_and_positive(ops in proptest::collection::vec(op_strategy(), 0..200)) {
            let menu: Vec<Product> = (0..4).map(|i| test_product(&format!("p{}", i), 100)).collect();
            let mut cart = Cart::new();

            for op in ops {
                match op {
                    Op::Add(i) => {
                        if let Some(product) = menu.get(i) {
                            cart.add(product);
                        }
                    }
                    Op::Increment(i) => cart.increment(&format!("p{}", i)),
                    Op::Decrement(i) => cart.decrement(&format!("p{}", i)),
                    Op::Remove(i) => cart.remove(&format!("p{}", i)),
                }

                let mut seen = HashSet::new();
                for line in cart.lines() {
                    prop_assert!(seen.insert(line.product_id.clone()));
                    prop_assert!(line.quantity >= 1);
                }
            }
        }
    }
}
