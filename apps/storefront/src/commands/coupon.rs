//! # Coupon Commands
//!
//! The coupon field in the cart drawer and its "Apply" button.

use serde::Serialize;
use storefront_core::CouponRule;
use tracing::{debug, info, warn};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::Storefront;

/// Result of a successful apply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub applied: CouponRule,
    pub cart: CartResponse,
}

/// Replaces the coupon field text. Stored uppercased.
pub fn set_coupon_code(store: &mut Storefront, text: &str) -> CartResponse {
    debug!(text = %text, "set_coupon_code command");
    store.set_coupon_code(text);
    store.snapshot()
}

/// Applies the code in the coupon field.
///
/// ## Errors
/// `COUPON_ERROR` with either "Invalid coupon code: ..." (the previously
/// applied coupon is dropped) or "Add items to cart before applying a coupon"
/// (the previous coupon stays).
pub fn apply_coupon(store: &mut Storefront) -> Result<CouponResponse, ApiError> {
    debug!(code = %store.coupon_code(), "apply_coupon command");

    match store.apply_coupon() {
        Ok(applied) => {
            info!(code = %applied.code, label = %applied.label, "Coupon applied");
            Ok(CouponResponse {
                applied,
                cart: store.snapshot(),
            })
        }
        Err(e) => {
            warn!(code = %store.coupon_code(), error = %e, "Coupon rejected");
            Err(e.into())
        }
    }
}
