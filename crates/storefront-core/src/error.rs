//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  ├── CatalogError     - Menu construction failures                     │
//! │  ├── CouponError      - Unknown code / empty cart                      │
//! │  ├── CheckoutError    - Missing delivery or payment fields             │
//! │  └── CoreError        - Umbrella for all of the above                  │
//! │                                                                         │
//! │  Shell errors (apps/storefront)                                        │
//! │  └── ApiError         - What the presentation layer renders            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → inline notice          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, field names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for every failure the core can report.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not on the menu.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Menu could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Coupon was rejected.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Checkout submission was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised while building a menu or a coupon table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A product record failed validation.
    #[error("Invalid product '{id}': {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// A coupon rule failed validation.
    #[error("Invalid coupon rule '{code}': {source}")]
    InvalidCoupon {
        code: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Coupon Error
// =============================================================================

/// Why a coupon code was rejected.
///
/// ## User Workflow
/// ```text
/// Enter "xyz" ──► Apply
///      │
///      ▼
/// normalize → "XYZ" → lookup → None
///      │
///      ▼
/// Invalid { code: "XYZ" }   (any applied coupon is cleared)
///      │
///      ▼
/// UI shows: "Invalid coupon code: XYZ"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// Code is not in the rule table (or was blank).
    #[error("Invalid coupon code: {code}")]
    Invalid { code: String },

    /// The cart subtotal is zero.
    #[error("Add items to cart before applying a coupon")]
    EmptyCart,
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Why a checkout submission was blocked.
///
/// The form stays in `Editing` whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Name, phone or address missing.
    #[error("Please fill in {}", .missing.join(", "))]
    MissingDeliveryDetails { missing: Vec<String> },

    /// UPI selected without an id.
    #[error("Please enter a valid UPI ID")]
    MissingUpiId,

    /// Card selected with one or more card fields blank.
    #[error("Please complete card details: {} missing", .missing.join(", "))]
    IncompleteCard { missing: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================
