//! # Pricing Engine
//!
//! Pure functions deriving subtotal, discount and total from a cart and an
//! optional coupon.
//!
//! ```text
//! Cart ──► subtotal ──┬──────────────────────────► total = max(subtotal − discount, 0)
//!                     │                                         ▲
//! Coupon ─────────────┴──► discount = min(rule(subtotal), subtotal)
//! ```
//!
//! Nothing here is stored: the shell recomputes on every render. For larger
//! carts [`PricingMemo`] caches the last summary keyed on the cart revision
//! and the applied coupon rule.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::coupon::{CouponKind, CouponRule};
use crate::money::Money;
use crate::types::PercentRate;

/// Discount derived from the cart and the applied coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    /// Amount taken off the subtotal, 0 <= amount <= subtotal.
    pub amount: Money,

    /// Coupon label ("WELCOME10 (10% off)"), empty when no coupon applies.
    pub label: String,
}

impl AppliedDiscount {
    /// The "no coupon" discount.
    pub fn none() -> Self {
        AppliedDiscount::default()
    }
}

/// Subtotal, discount and total for one cart + coupon state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub subtotal: Money,
    pub discount: AppliedDiscount,
    pub total: Money,
}

impl PriceSummary {
    /// Computes every derived amount for the current cart and coupon.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, CouponBook, CouponValidator, PriceSummary, Product};
    /// use storefront_core::money::Money;
    ///
    /// let mut cart = Cart::new();
    /// cart.add(&Product::new("x", "Thali", Money::from_cents(6000), "", "", None));
    ///
    /// let save100 = CouponBook::builtin().lookup("SAVE100");
    /// let summary = PriceSummary::compute(&cart, save100.as_ref());
    ///
    /// // Flat ₹100 off a ₹60 cart is capped at ₹60
    /// assert_eq!(summary.discount.amount.cents(), 6000);
    /// assert_eq!(summary.total.cents(), 0);
    /// ```
    pub fn compute(cart: &Cart, coupon: Option<&CouponRule>) -> Self {
        let subtotal = subtotal(cart);
        let discount = discount(subtotal, coupon);
        let total = total(subtotal, &discount);

        PriceSummary {
            subtotal,
            discount,
            total,
        }
    }
}

/// Σ unit price × quantity over all lines.
pub fn subtotal(cart: &Cart) -> Money {
    cart.lines().iter().map(|line| line.line_total()).sum()
}

/// Discount for `subtotal` under `coupon`.
///
/// ## Rules
/// - No coupon: zero, empty label
/// - Percent: `subtotal × bps / 10000`, rounded half-up, capped at subtotal
/// - Flat: `min(value, subtotal)`
/// - Never negative
pub fn discount(subtotal: Money, coupon: Option<&CouponRule>) -> AppliedDiscount {
    let Some(rule) = coupon else {
        return AppliedDiscount::none();
    };

    let raw = match rule.kind {
        CouponKind::Percent => {
            let bps = u32::try_from(rule.value.max(0)).unwrap_or(u32::MAX);
            subtotal.percentage(PercentRate::from_bps(bps))
        }
        CouponKind::Flat => Money::from_cents(rule.value),
    };

    let amount = raw.min(subtotal).max(Money::zero());

    AppliedDiscount {
        amount,
        label: rule.label.clone(),
    }
}

/// `max(subtotal − discount, 0)`.
pub fn total(subtotal: Money, discount: &AppliedDiscount) -> Money {
    subtotal.saturating_sub_floor(discount.amount)
}

// =============================================================================
// Memoization
// =============================================================================

/// Caches the last [`PriceSummary`], keyed on `(cart revision, coupon rule)`.
///
/// The cart bumps its revision on every content change, so a hit is only
/// possible when neither the cart nor the coupon moved since the last call.
/// The whole rule is part of the key: a validator may hand back a different
/// rule under the same code.
#[derive(Debug, Default)]
pub struct PricingMemo {
    key: Option<(u64, Option<CouponRule>)>,
    summary: PriceSummary,
}

impl PricingMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached summary, recomputing if the key changed.
    pub fn summary(&mut self, cart: &Cart, coupon: Option<&CouponRule>) -> &PriceSummary {
        let key = (cart.revision(), coupon.cloned());

        if self.key.as_ref() != Some(&key) {
            self.summary = PriceSummary::compute(cart, coupon);
            self.key = Some(key);
        }

        &self.summary
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
