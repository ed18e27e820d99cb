//! # Coupon Validator
//!
//! Maps a user-entered code to a discount rule.
//!
//! ## Apply Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_coupon(validator, " welcome10 ", subtotal, &mut applied)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize ──► "WELCOME10"                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validator.lookup(code)                                                 │
//! │       ├── None ─────────► applied = None,  Err(Invalid)                 │
//! │       ▼                                                                 │
//! │  subtotal == 0? ────────► applied unchanged, Err(EmptyCart)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  applied = Some(rule), Ok(rule)    (replaces any previous coupon)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule table is plain data ([`CouponBook`]) behind the
//! [`CouponValidator`] trait, so another source of rules can be plugged in
//! without touching the pricing engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CatalogError, CouponError, ValidationError};
use crate::money::Money;
use crate::validation::{validate_coupon_code, validate_name, validate_rate_bps, ValidationResult};

// =============================================================================
// Coupon Rule
// =============================================================================

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` is a rate in basis points (1000 = 10% off).
    Percent,
    /// `value` is an amount in minor units (10000 = ₹100 off).
    Flat,
}

/// One row of the coupon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponRule {
    /// Normalized (uppercase) code, the table key.
    pub code: String,

    pub kind: CouponKind,

    /// Basis points for `Percent`, minor units for `Flat`.
    pub value: i64,

    /// Shown next to the discount line.
    #[serde(default)]
    pub label: String,
}

impl CouponRule {
    /// Creates a rule, normalizing the code.
    pub fn new(code: &str, kind: CouponKind, value: i64, label: impl Into<String>) -> Self {
        CouponRule {
            code: normalize_code(code),
            kind,
            value,
            label: label.into(),
        }
    }

    /// Percent-off rule from a whole-number percentage.
    pub fn percent(code: &str, pct: u32, label: impl Into<String>) -> Self {
        CouponRule::new(code, CouponKind::Percent, i64::from(pct) * 100, label)
    }

    /// Flat amount-off rule.
    pub fn flat(code: &str, amount: Money, label: impl Into<String>) -> Self {
        CouponRule::new(code, CouponKind::Flat, amount.cents(), label)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_coupon_code(&self.code)?;
        match self.kind {
            CouponKind::Percent => validate_rate_bps("value", self.value)?,
            CouponKind::Flat => {
                if self.value < 0 {
                    return Err(ValidationError::OutOfRange {
                        field: "value".to_string(),
                        min: 0,
                        max: i64::MAX,
                    });
                }
            }
        }
        validate_name("label", &self.label)
    }
}

/// Trims surrounding whitespace and uppercases a user-entered code.
///
/// ## Example
/// ```rust
/// use storefront_core::normalize_code;
///
/// assert_eq!(normalize_code("  foodie20\n"), "FOODIE20");
/// ```
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// =============================================================================
// Validator Seam
// =============================================================================

/// Source of coupon rules.
///
/// `code` is always passed already normalized.
pub trait CouponValidator {
    fn lookup(&self, code: &str) -> Option<CouponRule>;
}

/// The static coupon table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponBook {
    rules: Vec<CouponRule>,
}

impl CouponBook {
    /// Builds a table, validating and normalizing every rule.
    ///
    /// ## Rules
    /// - codes are non-empty, alphanumeric and unique after normalization
    /// - percent values are within 0..=10000 bps
    /// - flat values are non-negative
    /// - a blank label falls back to the code
    pub fn new(rules: Vec<CouponRule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());

        for mut rule in rules {
            rule.code = normalize_code(&rule.code);
            if rule.label.trim().is_empty() {
                rule.label = rule.code.clone();
            }

            let check = rule.validate().and_then(|()| {
                if seen.insert(rule.code.clone()) {
                    Ok(())
                } else {
                    Err(ValidationError::Duplicate {
                        field: "code".to_string(),
                        value: rule.code.clone(),
                    })
                }
            });

            check.map_err(|source| CatalogError::InvalidCoupon {
                code: rule.code.clone(),
                source,
            })?;

            normalized.push(rule);
        }

        Ok(CouponBook { rules: normalized })
    }

    /// The demo coupon table.
    ///
    /// | code      | kind    | value      |
    /// |-----------|---------|------------|
    /// | WELCOME10 | percent | 10%        |
    /// | FOODIE20  | percent | 20%        |
    /// | SAVE100   | flat    | ₹100.00    |
    pub fn builtin() -> Self {
        CouponBook {
            rules: builtin_rules(),
        }
    }

    /// Rules in table order.
    pub fn rules(&self) -> &[CouponRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        CouponBook::builtin()
    }
}

impl CouponValidator for CouponBook {
    fn lookup(&self, code: &str) -> Option<CouponRule> {
        self.rules.iter().find(|r| r.code == code).cloned()
    }
}

/// Returns the built-in rules; shared with the shell's config defaults.
pub fn builtin_rules() -> Vec<CouponRule> {
    vec![
        CouponRule::percent("WELCOME10", 10, "WELCOME10 (10% off)"),
        CouponRule::percent("FOODIE20", 20, "FOODIE20 (20% off)"),
        CouponRule::flat("SAVE100", Money::from_major_minor(100, 0), "SAVE100 (\u{20b9}100 off)"),
    ]
}

// =============================================================================
// Apply
// =============================================================================

/// Validates `raw_code` against `validator` and updates `applied`.
///
/// ## Outcomes
/// - Unknown (or blank) code: `applied` is cleared, `Err(Invalid)`
/// - Known code, `subtotal` zero: `applied` untouched, `Err(EmptyCart)`
/// - Otherwise: `applied` replaced by the rule, `Ok(rule)`
///
/// ## Example
/// ```rust
/// use storefront_core::{apply_coupon, CouponBook, CouponError};
/// use storefront_core::money::Money;
///
/// let book = CouponBook::builtin();
/// let mut applied = None;
///
/// let rule = apply_coupon(&book, "save100", Money::from_cents(6000), &mut applied).unwrap();
/// assert_eq!(rule.code, "SAVE100");
///
/// let err = apply_coupon(&book, "XYZ", Money::from_cents(6000), &mut applied).unwrap_err();
/// assert_eq!(err, CouponError::Invalid { code: "XYZ".into() });
/// assert!(applied.is_none());
/// ```
pub fn apply_coupon<V>(
    validator: &V,
    raw_code: &str,
    subtotal: Money,
    applied: &mut Option<CouponRule>,
) -> Result<CouponRule, CouponError>
where
    V: CouponValidator + ?Sized,
{
    let code = normalize_code(raw_code);

    let Some(rule) = validator.lookup(&code) else {
        *applied = None;
        return Err(CouponError::Invalid { code });
    };

    if !subtotal.is_positive() {
        return Err(CouponError::EmptyCart);
    }

    *applied = Some(rule.clone());
    Ok(rule)
}

// =============================================================================
// Unit Tests
// =============================================================================
