//! # Domain Types
//!
//! Core domain types shared across the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  PercentRate    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("p1")      │   │  bps (u32)      │   │  Cod            │       │
//! │  │  name           │   │  1000 = 10%     │   │  Card           │       │
//! │  │  price (Money)  │   └─────────────────┘   │  Upi            │       │
//! │  │  image_ref      │                         └─────────────────┘       │
//! │  │  description    │                                                    │
//! │  │  tag (optional) │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart, coupon and checkout types live next to their logic in
//! [`crate::cart`], [`crate::coupon`] and [`crate::checkout`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Percent Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (WELCOME10), 2000 bps = 20% (FOODIE20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercentRate(u32);

impl PercentRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        PercentRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A dish on the menu.
///
/// Products are loaded once at startup and never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier ("p1", "p2", ...).
    pub id: String,

    /// Display name shown on the menu card and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Image URL or asset reference.
    pub image_ref: String,

    /// Short description for the menu card.
    pub description: String,

    /// Optional promotional badge ("New", "Chef's pick", ...).
    pub tag: Option<String>,
}

impl Product {
    /// Convenience constructor for compiled-in menus and tests.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image_ref: impl Into<String>,
        description: impl Into<String>,
        tag: Option<&str>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image_ref: image_ref.into(),
            description: description.into(),
            tag: tag.map(str::to_string),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Credit or debit card.
    Card,
    /// Unified Payments Interface.
    Upi,
}

impl PaymentMethod {
    /// All methods, in the order the checkout form lists them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cod, PaymentMethod::Card, PaymentMethod::Upi];

    /// Human-readable label for the payment option.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cod => write!(f, "COD"),
            PaymentMethod::Card => write!(f, "CARD"),
            PaymentMethod::Upi => write!(f, "UPI"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" | "cash" => Ok(PaymentMethod::Cod),
            "card" | "credit" | "debit" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cod".to_string(), "card".to_string(), "upi".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
