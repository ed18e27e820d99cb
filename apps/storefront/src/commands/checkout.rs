//! # Checkout Commands
//!
//! Delivery form, payment method selection and order placement.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  place_order()                                                          │
//! │       │                                                                 │
//! │       ├── cart empty? ──────────────► CHECKOUT_ERROR "Your cart is empty"│
//! │       ├── name/phone/address? ──────► CHECKOUT_ERROR "Please fill in .." │
//! │       ├── UPI id? / card fields? ───► CHECKOUT_ERROR                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order built (id, lines, summary, payment details w/o secrets)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart cleared, coupon dropped, coupon field emptied, scroll to top      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderPlacedResponse { order, notice: "Order placed!\n..." }            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CheckoutForm, FormField, FormState, Order, PaymentMethod, PriceSummary};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, Storefront};

/// Checkout section snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub form: CheckoutForm,
    pub state: FormState,
    pub summary: PriceSummary,
    pub item_count: u64,
}

/// The "order placed" event plus the customer-facing notice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedResponse {
    pub order: Order,
    pub notice: String,
}

impl CheckoutResponse {
    fn from_store(store: &mut Storefront) -> Self {
        CheckoutResponse {
            form: store.checkout().form().clone(),
            state: store.checkout().state(),
            summary: store.summary(),
            item_count: store.cart().total_quantity(),
        }
    }
}

/// Gets the checkout section as it stands.
pub fn get_checkout(store: &mut Storefront) -> CheckoutResponse {
    debug!("get_checkout command");
    CheckoutResponse::from_store(store)
}

/// Closes the drawer and scrolls to the checkout section.
pub fn go_to_checkout(store: &mut Storefront) -> CheckoutResponse {
    debug!("go_to_checkout command");
    store.go_to_checkout();
    CheckoutResponse::from_store(store)
}

/// Sets one form field by name ("name", "phone", "card number", ...).
///
/// ## Errors
/// `VALIDATION_ERROR` when `field` names no form field.
pub fn update_form(
    store: &mut Storefront,
    field: &str,
    value: &str,
) -> Result<CheckoutResponse, ApiError> {
    let field: FormField = field.parse()?;
    // field name only: every value is customer data
    debug!(field = %field, "update_form command");

    store.update_form(field, value);
    Ok(CheckoutResponse::from_store(store))
}

/// Selects the payment method ("cod", "card", "upi").
pub fn select_payment(store: &mut Storefront, method: &str) -> Result<CheckoutResponse, ApiError> {
    debug!(method = %method, "select_payment command");

    let method: PaymentMethod = method.parse()?;
    store.select_payment(method);
    Ok(CheckoutResponse::from_store(store))
}

/// Places the order.
///
/// ## Returns
/// The order and a notice naming the customer, payment method and amount.
///
/// ## Errors
/// `CHECKOUT_ERROR` when the cart is empty or required fields are missing;
/// nothing is reset in that case.
pub fn place_order(
    store: &mut Storefront,
    config: &ConfigState,
) -> Result<OrderPlacedResponse, ApiError> {
    debug!("place_order command");

    let order = store.place_order().map_err(|e| {
        warn!(error = %e, "Order rejected");
        ApiError::from(e)
    })?;

    info!(
        order_id = %order.id,
        payment = %order.payment_method,
        total = %order.summary.total,
        lines = order.lines.len(),
        "Order placed"
    );

    let notice = order_notice(&order, config);
    Ok(OrderPlacedResponse { order, notice })
}

fn order_notice(order: &Order, config: &ConfigState) -> String {
    format!(
        "Order placed!\nCustomer: {}\nPayment: {}\nAmount: {}",
        order.customer_name,
        order.payment_method,
        config.format_currency(order.summary.total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::coupon::{apply_coupon, set_coupon_code};
    use crate::error::ErrorCode;
    use crate::state::Section;
    use storefront_core::PaymentDetails;

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn fill(store: &mut Storefront) {
        update_form(store, "name", "Asha").unwrap();
        update_form(store, "phone", "9876543210").unwrap();
        update_form(store, "address", "12 MG Road").unwrap();
    }

    #[test]
    fn test_cod_order_notice() {
        let mut store = Storefront::default();
        let config = ConfigState::default();
        add_to_cart(&mut store, "p1").unwrap();
        add_to_cart(&mut store, "p1").unwrap();
        set_coupon_code(&mut store, "WELCOME10");
        apply_coupon(&mut store).unwrap();
        fill(&mut store);

        let placed = place_order(&mut store, &config).unwrap();

        assert_eq!(
            placed.notice,
            "Order placed!\nCustomer: Asha\nPayment: COD\nAmount: ₹538.20"
        );
        assert_eq!(placed.order.lines.len(), 1);
        assert!(store.snapshot().items.is_empty());
        assert_eq!(store.view().section, Section::Top);
    }

    #[test]
    fn test_card_without_cvv_rejected() {
        let mut store = Storefront::default();
        let config = ConfigState::default();
        add_to_cart(&mut store, "p5").unwrap();
        fill(&mut store);
        select_payment(&mut store, "card").unwrap();
        update_form(&mut store, "card-number", "4111111111111111").unwrap();
        update_form(&mut store, "card-name", "ASHA").unwrap();
        update_form(&mut store, "expiry", "01/30").unwrap();

        let err = place_order(&mut store, &config).unwrap_err();

        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(err.message, "Please complete card details: cvv missing");
        assert_eq!(get_checkout(&mut store).state, FormState::Editing);
        assert_eq!(store.snapshot().badge_count, 1);
    }

    #[test]
    fn test_upi_order() {
        let mut store = Storefront::default();
        let config = ConfigState::default();
        add_to_cart(&mut store, "p4").unwrap();
        fill(&mut store);
        select_payment(&mut store, "UPI").unwrap();
        update_form(&mut store, "upi", "asha@okbank").unwrap();

        let placed = place_order(&mut store, &config).unwrap();
        assert_eq!(
            placed.order.payment_details,
            PaymentDetails::Upi {
                upi_id: "asha@okbank".to_string()
            }
        );
        assert!(placed.notice.contains("Payment: UPI"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut store = Storefront::default();
        fill(&mut store);

        let err = place_order(&mut store, &ConfigState::default()).unwrap_err();
        assert_eq!(err.message, "Your cart is empty");
    }

    #[test]
    fn test_unknown_field_and_method() {
        let mut store = Storefront::default();
        assert_eq!(
            update_form(&mut store, "email", "a@b.c").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            select_payment(&mut store, "bitcoin").unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_go_to_checkout_closes_drawer() {
        let mut store = Storefront::default();
        add_to_cart(&mut store, "p2").unwrap();

        let checkout = go_to_checkout(&mut store);

        assert_eq!(checkout.item_count, 1);
        assert!(!store.view().cart_open);
        assert_eq!(store.view().section, Section::Checkout);
    }

    #[test]
    fn test_update_form_logs_field_names_only() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = Storefront::default();
            fill(&mut store);
            update_form(&mut store, "upi", "asha@okbank").unwrap();
            update_form(&mut store, "card name", "ASHA R").unwrap();
            update_form(&mut store, "expiry", "12/29").unwrap();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("update_form command"));
        assert!(text.contains("phone"));
        for secret in ["Asha", "9876543210", "12 MG Road", "asha@okbank", "ASHA R", "12/29"] {
            assert!(!text.contains(secret), "log leaked {secret}");
        }
    }
}
