//! # Commands Module
//!
//! Every user action the storefront understands.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Menu listing
//! ├── cart.rs      ◄─── Cart manipulation + snapshot
//! ├── coupon.rs    ◄─── Coupon field and apply
//! ├── checkout.rs  ◄─── Form edits, payment method, place order
//! └── view.rs      ◄─── Drawer and scrolling
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  REPL line ──► Command ──► commands::cart::add_to_cart(&mut store, id)  │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     Storefront (state) ──► storefront-core             │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     Result<CartResponse, ApiError>                      │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                            render ──► stdout                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never print. They return immutable snapshot responses that the
//! renderer (or a JSON front end) turns into output.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod view;

pub use cart::CartResponse;
pub use catalog::MenuResponse;
pub use checkout::{CheckoutResponse, OrderPlacedResponse};
pub use coupon::CouponResponse;
