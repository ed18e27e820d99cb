//! # Storefront Controller
//!
//! The single owner of all mutable shell state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront                                      │
//! │                                                                         │
//! │   catalog ─────── read-only menu                                        │
//! │   cart ────────── Cart ledger (storefront-core)                         │
//! │   coupons ─────── Box<dyn CouponValidator>                              │
//! │   coupon_code ─── what the customer typed (uppercased)                  │
//! │   applied ─────── Option<CouponRule>                                    │
//! │   checkout ────── form + Editing/Submitting/Success                     │
//! │   view ────────── drawer open?  which section?                          │
//! │   memo ────────── PricingMemo                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The REPL owns the controller and mutates it through `&mut self`, one
//! command at a time, so nothing here is shared or locked.

use serde::{Deserialize, Serialize};
use storefront_core::{
    apply_coupon, Cart, Catalog, CatalogError, Checkout, CheckoutError, CoreError, CouponBook,
    CouponError, CouponRule, CouponValidator, FormField, LineItem, Order, PaymentMethod,
    PriceSummary, PricingMemo,
};

/// Page sections the view can scroll to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Hero banner and navbar
    #[default]
    Top,
    /// Product grid
    Menu,
    /// Delivery + payment form
    Checkout,
}

/// Visual state that is not business data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub cart_open: bool,
    pub section: Section,
}

/// Top-level controller.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    coupons: Box<dyn CouponValidator>,
    coupon_code: String,
    applied: Option<CouponRule>,
    checkout: Checkout,
    view: ViewState,
    memo: PricingMemo,
}

impl Storefront {
    /// Creates a storefront over `catalog` with coupons from `coupons`.
    pub fn new(catalog: Catalog, coupons: Box<dyn CouponValidator>) -> Self {
        Storefront {
            catalog,
            cart: Cart::new(),
            coupons,
            coupon_code: String::new(),
            applied: None,
            checkout: Checkout::new(),
            view: ViewState::default(),
            memo: PricingMemo::new(),
        }
    }

    /// Built-in menu with the given coupon rules.
    pub fn with_coupons(rules: Vec<CouponRule>) -> Result<Self, CatalogError> {
        let book = CouponBook::new(rules)?;
        Ok(Storefront::new(Catalog::builtin(), Box::new(book)))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    pub fn applied_coupon(&self) -> Option<&CouponRule> {
        self.applied.as_ref()
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Current subtotal, discount and total.
    pub fn summary(&mut self) -> PriceSummary {
        self.memo.summary(&self.cart, self.applied.as_ref()).clone()
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn open_cart(&mut self) {
        self.view.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.view.cart_open = false;
    }

    pub fn scroll_to(&mut self, section: Section) {
        self.view.section = section;
    }

    /// Closes the drawer and scrolls to the checkout form.
    pub fn go_to_checkout(&mut self) {
        self.view.cart_open = false;
        self.view.section = Section::Checkout;
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a menu product and opens the drawer.
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<&LineItem, CoreError> {
        let product = self.catalog.require(product_id)?;
        self.view.cart_open = true;
        Ok(self.cart.add(product))
    }

    pub fn increment(&mut self, product_id: &str) {
        self.cart.increment(product_id);
    }

    pub fn decrement(&mut self, product_id: &str) {
        self.cart.decrement(product_id);
    }

    pub fn remove(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    // =========================================================================
    // Coupon
    // =========================================================================

    /// Stores the coupon field text, uppercased as typed.
    pub fn set_coupon_code(&mut self, text: &str) {
        self.coupon_code = text.to_uppercase();
    }

    /// Validates the coupon field against the rule table.
    pub fn apply_coupon(&mut self) -> Result<CouponRule, CouponError> {
        let subtotal = self.summary().subtotal;
        apply_coupon(
            self.coupons.as_ref(),
            &self.coupon_code,
            subtotal,
            &mut self.applied,
        )
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn update_form(&mut self, field: FormField, value: &str) {
        self.checkout.set_field(field, value);
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.checkout.select_payment(method);
    }

    /// Submits the checkout form.
    ///
    /// On success the cart, the applied coupon and the coupon field are
    /// reset and the view scrolls back to the top.
    pub fn place_order(&mut self) -> Result<Order, CheckoutError> {
        let summary = self.summary();
        let order = self.checkout.submit(&self.cart, &summary)?;

        self.cart.clear();
        self.applied = None;
        self.coupon_code.clear();
        self.view.section = Section::Top;

        Ok(order)
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Storefront::new(Catalog::builtin(), Box::new(CouponBook::builtin()))
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("coupon_code", &self.coupon_code)
            .field("applied", &self.applied)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{FormState, Money};

    fn fill_delivery(store: &mut Storefront) {
        store.update_form(FormField::Name, "Asha");
        store.update_form(FormField::Phone, "9876543210");
        store.update_form(FormField::Address, "12 MG Road");
    }

    #[test]
    fn test_add_opens_drawer() {
        let mut store = Storefront::default();
        assert!(!store.view().cart_open);

        store.add_to_cart("p1").unwrap();

        assert!(store.view().cart_open);
        assert_eq!(store.cart().total_quantity(), 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut store = Storefront::default();
        let err = store.add_to_cart("p99").unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert!(store.cart().is_empty());
        assert!(!store.view().cart_open);
    }

    #[test]
    fn test_welcome10_on_two_pizzas() {
        let mut store = Storefront::default();
        store.add_to_cart("p1").unwrap();
        store.add_to_cart("p1").unwrap();
        store.set_coupon_code("welcome10");
        assert_eq!(store.coupon_code(), "WELCOME10");

        store.apply_coupon().unwrap();
        let summary = store.summary();

        assert_eq!(summary.subtotal, Money::from_cents(59800));
        assert_eq!(summary.discount.amount, Money::from_cents(5980));
        assert_eq!(summary.total, Money::from_cents(53820));
    }

    #[test]
    fn test_invalid_code_clears_applied() {
        let mut store = Storefront::default();
        store.add_to_cart("p5").unwrap();
        let plain = store.summary();

        store.set_coupon_code("FOODIE20");
        store.apply_coupon().unwrap();
        assert!(store.applied_coupon().is_some());

        store.set_coupon_code("XYZ");
        assert!(store.apply_coupon().is_err());
        assert!(store.applied_coupon().is_none());
        assert_eq!(store.summary(), plain);
    }

    #[test]
    fn test_coupon_on_empty_cart_rejected() {
        let mut store = Storefront::default();
        store.set_coupon_code("SAVE100");

        assert_eq!(store.apply_coupon().unwrap_err(), CouponError::EmptyCart);
        assert!(store.applied_coupon().is_none());
    }

    #[test]
    fn test_discount_follows_cart_changes() {
        let mut store = Storefront::default();
        store.add_to_cart("p6").unwrap();
        store.set_coupon_code("SAVE100");
        store.apply_coupon().unwrap();

        // ₹129 - ₹100
        assert_eq!(store.summary().total, Money::from_cents(2900));

        store.decrement("p6");
        let summary = store.summary();
        assert_eq!(summary.discount.amount, Money::zero());
        assert_eq!(summary.total, Money::zero());
    }

    #[test]
    fn test_go_to_checkout() {
        let mut store = Storefront::default();
        store.open_cart();
        store.go_to_checkout();

        assert_eq!(
            store.view(),
            ViewState {
                cart_open: false,
                section: Section::Checkout
            }
        );
    }

    #[test]
    fn test_place_order_resets_cart_and_coupon() {
        let mut store = Storefront::default();
        store.add_to_cart("p2").unwrap();
        store.set_coupon_code("WELCOME10");
        store.apply_coupon().unwrap();
        store.go_to_checkout();
        fill_delivery(&mut store);

        let order = store.place_order().unwrap();

        assert_eq!(order.summary.total, Money::from_cents(17910));
        assert!(store.cart().is_empty());
        assert!(store.applied_coupon().is_none());
        assert_eq!(store.coupon_code(), "");
        assert_eq!(store.view().section, Section::Top);
        assert_eq!(store.checkout().state(), FormState::Success);
    }

    #[test]
    fn test_failed_order_keeps_everything() {
        let mut store = Storefront::default();
        store.add_to_cart("p3").unwrap();
        store.set_coupon_code("FOODIE20");
        store.apply_coupon().unwrap();
        fill_delivery(&mut store);
        store.select_payment(PaymentMethod::Card);

        assert!(matches!(
            store.place_order(),
            Err(CheckoutError::IncompleteCard { .. })
        ));
        assert_eq!(store.cart().len(), 1);
        assert!(store.applied_coupon().is_some());
        assert_eq!(store.coupon_code(), "FOODIE20");
        assert_eq!(store.checkout().state(), FormState::Editing);
    }

    #[test]
    fn test_custom_validator() {
        struct HappyHour;

        impl CouponValidator for HappyHour {
            fn lookup(&self, code: &str) -> Option<CouponRule> {
                (code == "HAPPY").then(|| CouponRule::percent("HAPPY", 50, "Happy hour"))
            }
        }

        let mut store = Storefront::new(Catalog::builtin(), Box::new(HappyHour));
        store.add_to_cart("p4").unwrap();
        store.set_coupon_code("happy");
        store.apply_coupon().unwrap();

        assert_eq!(store.summary().total, Money::from_cents(12450));
    }
}
