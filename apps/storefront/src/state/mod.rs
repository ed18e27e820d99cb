//! # State Module
//!
//! Application state for the storefront shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐         ┌──────────────────────────────────────┐  │
//! │  │   ConfigState    │ ──────► │            Storefront                │  │
//! │  │                  │ coupons │                                      │  │
//! │  │  store_name      │         │  cart, coupon, checkout form, view   │  │
//! │  │  currency        │         │  (mutated by commands, &mut self)    │  │
//! │  │  coupons         │         │                                      │  │
//! │  └──────────────────┘         └──────────────────────────────────────┘  │
//! │       read-only                        owned by the REPL loop          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Config is split from the controller so rendering can borrow it while a
//! command holds the controller mutably.

mod config;
mod storefront;

pub use config::{ConfigError, ConfigResult, ConfigState};
pub use storefront::{Section, Storefront, ViewState};
