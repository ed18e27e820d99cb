//! # storefront-core: Pure Business Logic for the RestoShop Storefront
//!
//! This crate holds the cart ledger, the pricing engine, the coupon validator
//! and the checkout validation rules as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RestoShop Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Shell (apps/storefront)            │   │
//! │  │   Menu ──► Cart Drawer ──► Coupon Box ──► Checkout Form        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │   │
//! │  │  │ catalog │ │  cart  │ │ pricing │ │ coupon  │ │ checkout │  │   │
//! │  │  │ Product │ │  Cart  │ │ Summary │ │  Rules  │ │   Form   │  │   │
//! │  │  │  Menu   │ │LineItem│ │  Memo   │ │ Apply   │ │  Order   │  │   │
//! │  │  └─────────┘ └────────┘ └─────────┘ └─────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Shared domain types (Product, PaymentMethod, ...)
//! - [`catalog`] - The read-only menu
//! - [`cart`] - The cart ledger
//! - [`pricing`] - Subtotal, discount and total
//! - [`coupon`] - Coupon rule table and validation
//! - [`checkout`] - Checkout form state machine and orders
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{apply_coupon, Catalog, Cart, CouponBook, PriceSummary};
//!
//! let catalog = Catalog::builtin();
//! let coupons = CouponBook::builtin();
//! let mut cart = Cart::new();
//!
//! let pizza = catalog.get("p1").unwrap();
//! cart.add(pizza);
//! cart.add(pizza);
//!
//! let mut applied = None;
//! let subtotal = storefront_core::pricing::subtotal(&cart);
//! apply_coupon(&coupons, " welcome10 ", subtotal, &mut applied).unwrap();
//!
//! let summary = PriceSummary::compute(&cart, applied.as_ref());
//! assert_eq!(summary.subtotal.cents(), 59800);
//! assert_eq!(summary.discount.amount.cents(), 5980);
//! assert_eq!(summary.total.cents(), 53820);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Cart` instead of
// `use storefront_core::cart::Cart`

pub use cart::{Cart, LineItem};
pub use catalog::Catalog;
pub use checkout::{CardDetails, Checkout, CheckoutForm, FormField, FormState, Order, PaymentDetails};
pub use coupon::{apply_coupon, normalize_code, CouponBook, CouponKind, CouponRule, CouponValidator};
pub use error::{CatalogError, CheckoutError, CoreError, CouponError, ValidationError};
pub use money::Money;
pub use pricing::{AppliedDiscount, PriceSummary, PricingMemo};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// One hundred percent expressed in basis points.
pub const FULL_RATE_BPS: u32 = 10_000;
