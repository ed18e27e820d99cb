//! # Checkout Form
//!
//! Delivery + payment details, their validation, and order construction.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐  submit() ok   ┌────────────┐  order built  ┌─────────┐   │
//! │   │ Editing │ ─────────────► │ Submitting │ ────────────► │ Success │   │
//! │   └─────────┘                └────────────┘               └─────────┘   │
//! │     ▲    │                                                     │        │
//! │     │    │ submit() err (CheckoutError, stays Editing)         │        │
//! │     └────┘                                                     │        │
//! │     ▲                                                          │        │
//! │     └───────────────── any field edited ───────────────────────┘        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no failure state: a rejected submission leaves the form editable
//! and returns the reason.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::error::{CheckoutError, ValidationError};
use crate::pricing::PriceSummary;
use crate::types::PaymentMethod;
use crate::validation::missing_fields;

// =============================================================================
// Form
// =============================================================================

/// Card fields, only required when paying by card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub name: String,
    /// MM/YY
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

/// Everything the customer types into the checkout section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub upi_id: String,
    pub card: CardDetails,
}

impl CheckoutForm {
    /// Writes one text field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Address => self.address = value,
            FormField::UpiId => self.upi_id = value,
            FormField::CardNumber => self.card.number = value,
            FormField::CardName => self.card.name = value,
            FormField::CardExpiry => self.card.expiry = value,
            FormField::CardCvv => self.card.cvv = value,
        }
    }

    /// Reads one text field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
            FormField::UpiId => &self.upi_id,
            FormField::CardNumber => &self.card.number,
            FormField::CardName => &self.card.name,
            FormField::CardExpiry => &self.card.expiry,
            FormField::CardCvv => &self.card.cvv,
        }
    }

    /// Checks the fields required for the selected payment method.
    ///
    /// ## Rules
    /// 1. name, phone, address non-empty
    /// 2. UPI: upi id non-empty
    /// 3. Card: number, name on card, expiry and CVV non-empty
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing = missing_fields(&[
            (FormField::Name.label(), &self.name),
            (FormField::Phone.label(), &self.phone),
            (FormField::Address.label(), &self.address),
        ]);
        if !missing.is_empty() {
            return Err(CheckoutError::MissingDeliveryDetails { missing });
        }

        match self.payment_method {
            PaymentMethod::Cod => Ok(()),
            PaymentMethod::Upi => {
                if self.upi_id.trim().is_empty() {
                    Err(CheckoutError::MissingUpiId)
                } else {
                    Ok(())
                }
            }
            PaymentMethod::Card => {
                let missing = missing_fields(&[
                    (FormField::CardNumber.label(), &self.card.number),
                    (FormField::CardName.label(), &self.card.name),
                    (FormField::CardExpiry.label(), &self.card.expiry),
                    (FormField::CardCvv.label(), &self.card.cvv),
                ]);
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(CheckoutError::IncompleteCard { missing })
                }
            }
        }
    }
}

/// Addressable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Address,
    UpiId,
    CardNumber,
    CardName,
    CardExpiry,
    CardCvv,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Phone,
        FormField::Address,
        FormField::UpiId,
        FormField::CardNumber,
        FormField::CardName,
        FormField::CardExpiry,
        FormField::CardCvv,
    ];

    /// Name used in messages and in the shell's `set` command.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::UpiId => "upi",
            FormField::CardNumber => "card number",
            FormField::CardName => "card name",
            FormField::CardExpiry => "expiry",
            FormField::CardCvv => "cvv",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "name" => Ok(FormField::Name),
            "phone" => Ok(FormField::Phone),
            "address" => Ok(FormField::Address),
            "upi" | "upi id" => Ok(FormField::UpiId),
            "card number" | "number" => Ok(FormField::CardNumber),
            "card name" | "name on card" => Ok(FormField::CardName),
            "expiry" | "card expiry" => Ok(FormField::CardExpiry),
            "cvv" | "card cvv" => Ok(FormField::CardCvv),
            _ => Err(ValidationError::NotAllowed {
                field: "form field".to_string(),
                allowed: FormField::ALL.iter().map(|f| f.label().to_string()).collect(),
            }),
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
    Success,
}

// =============================================================================
// Order
// =============================================================================

/// Payment data kept on an order. The CVV and full card number never are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    CashOnDelivery,
    Card { last4: String, name: String, expiry: String },
    Upi { upi_id: String },
}

impl PaymentDetails {
    fn from_form(form: &CheckoutForm) -> Self {
        match form.payment_method {
            PaymentMethod::Cod => PaymentDetails::CashOnDelivery,
            PaymentMethod::Card => PaymentDetails::Card {
                last4: form.card.last4(),
                name: form.card.name.trim().to_string(),
                expiry: form.card.expiry.trim().to_string(),
            },
            PaymentMethod::Upi => PaymentDetails::Upi {
                upi_id: form.upi_id.trim().to_string(),
            },
        }
    }
}

/// The "order placed" event payload. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// UUID v4.
    pub id: String,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub payment_details: PaymentDetails,
    /// Cart lines at submission time.
    pub lines: Vec<LineItem>,
    pub summary: PriceSummary,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Checkout
// =============================================================================

/// The checkout form together with its lifecycle state.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    form: CheckoutForm,
    state: FormState,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Edits one field. Returns the form to `Editing`.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.state = FormState::Editing;
    }

    /// Selects the payment method. Returns the form to `Editing`.
    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.form.payment_method = method;
        self.state = FormState::Editing;
    }

    /// Attempts `Editing → Submitting → Success`.
    ///
    /// ## Returns
    /// - `Ok(Order)`: the "order placed" event; state is `Success`
    /// - `Err(CheckoutError)`: nothing happened; state is `Editing`
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, Catalog, Checkout, FormField, FormState, PaymentMethod, PriceSummary};
    ///
    /// let catalog = Catalog::builtin();
    /// let mut cart = Cart::new();
    /// cart.add(catalog.get("p2").unwrap());
    ///
    /// let mut checkout = Checkout::new();
    /// checkout.set_field(FormField::Name, "Asha");
    /// checkout.set_field(FormField::Phone, "9876543210");
    /// checkout.set_field(FormField::Address, "12 MG Road");
    /// checkout.select_payment(PaymentMethod::Card);
    ///
    /// let summary = PriceSummary::compute(&cart, None);
    /// assert!(checkout.submit(&cart, &summary).is_err());
    /// assert_eq!(checkout.state(), FormState::Editing);
    /// ```
    pub fn submit(&mut self, cart: &Cart, summary: &PriceSummary) -> Result<Order, CheckoutError> {
        self.state = FormState::Editing;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.form.validate()?;

        self.state = FormState::Submitting;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            payment_method: self.form.payment_method,
            customer_name: self.form.name.trim().to_string(),
            phone: self.form.phone.trim().to_string(),
            address: self.form.address.trim().to_string(),
            payment_details: PaymentDetails::from_form(&self.form),
            lines: cart.lines().to_vec(),
            summary: summary.clone(),
            placed_at: Utc::now(),
        };

        self.state = FormState::Success;
        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;

    fn cart_with_item() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product::new("p1", "Pizza", Money::from_cents(29900), "", "", None));
        cart
    }

    fn filled() -> Checkout {
        let mut checkout = Checkout::new();
        checkout.set_field(FormField::Name, "Asha");
        checkout.set_field(FormField::Phone, "9876543210");
        checkout.set_field(FormField::Address, "12 MG Road, Bengaluru");
        checkout
    }

    fn submit(checkout: &mut Checkout, cart: &Cart) -> Result<Order, CheckoutError> {
        let summary = PriceSummary::compute(cart, None);
        checkout.submit(cart, &summary)
    }

    #[test]
    fn test_cod_order_succeeds() {
        let cart = cart_with_item();
        let mut checkout = filled();

        let order = submit(&mut checkout, &cart).unwrap();

        assert_eq!(checkout.state(), FormState::Success);
        assert_eq!(order.payment_method, PaymentMethod::Cod);
        assert_eq!(order.payment_details, PaymentDetails::CashOnDelivery);
        assert_eq!(order.customer_name, "Asha");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.summary.total.cents(), 29900);
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_missing_delivery_fields_listed() {
        let cart = cart_with_item();
        let mut checkout = Checkout::new();
        checkout.set_field(FormField::Phone, "98765");

        let err = submit(&mut checkout, &cart).unwrap_err();

        assert_eq!(
            err,
            CheckoutError::MissingDeliveryDetails {
                missing: vec!["name".to_string(), "address".to_string()]
            }
        );
        assert_eq!(checkout.state(), FormState::Editing);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let cart = cart_with_item();
        let mut checkout = filled();
        checkout.set_field(FormField::Address, "   ");

        assert!(matches!(
            submit(&mut checkout, &cart),
            Err(CheckoutError::MissingDeliveryDetails { .. })
        ));
    }

    #[test]
    fn test_upi_requires_id() {
        let cart = cart_with_item();
        let mut checkout = filled();
        checkout.select_payment(PaymentMethod::Upi);

        assert_eq!(submit(&mut checkout, &cart).unwrap_err(), CheckoutError::MissingUpiId);

        checkout.set_field(FormField::UpiId, "asha@okbank");
        let order = submit(&mut checkout, &cart).unwrap();
        assert_eq!(
            order.payment_details,
            PaymentDetails::Upi {
                upi_id: "asha@okbank".to_string()
            }
        );
    }

    #[test]
    fn test_card_with_empty_cvv_rejected() {
        let cart = cart_with_item();
        let mut checkout = filled();
        checkout.select_payment(PaymentMethod::Card);
        checkout.set_field(FormField::CardNumber, "4111 1111 1111 1234");
        checkout.set_field(FormField::CardName, "ASHA R");
        checkout.set_field(FormField::CardExpiry, "12/29");

        let err = submit(&mut checkout, &cart).unwrap_err();

        assert_eq!(
            err,
            CheckoutError::IncompleteCard {
                missing: vec!["cvv".to_string()]
            }
        );
        assert_eq!(checkout.state(), FormState::Editing);
    }

    #[test]
    fn test_card_order_keeps_no_secrets() {
        let cart = cart_with_item();
        let mut checkout = filled();
        checkout.select_payment(PaymentMethod::Card);
        checkout.set_field(FormField::CardNumber, "4111 1111 1111 1234");
        checkout.set_field(FormField::CardName, "ASHA R");
        checkout.set_field(FormField::CardExpiry, "12/29");
        checkout.set_field(FormField::CardCvv, "987");

        let order = submit(&mut checkout, &cart).unwrap();
        let json = serde_json::to_string(&order).unwrap();

        assert_eq!(
            order.payment_details,
            PaymentDetails::Card {
                last4: "1234".to_string(),
                name: "ASHA R".to_string(),
                expiry: "12/29".to_string()
            }
        );
        assert!(!json.contains("987"));
        assert!(!json.contains("4111"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut checkout = filled();
        assert_eq!(submit(&mut checkout, &Cart::new()).unwrap_err(), CheckoutError::EmptyCart);
        assert_eq!(checkout.state(), FormState::Editing);
    }

    #[test]
    fn test_editing_after_success_returns_to_editing() {
        let cart = cart_with_item();
        let mut checkout = filled();
        submit(&mut checkout, &cart).unwrap();
        assert_eq!(checkout.state(), FormState::Success);

        checkout.set_field(FormField::Phone, "9000000000");
        assert_eq!(checkout.state(), FormState::Editing);
    }

    #[test]
    fn test_form_field_parsing() {
        assert_eq!("card-number".parse::<FormField>().unwrap(), FormField::CardNumber);
        assert_eq!("UPI_ID".parse::<FormField>().unwrap(), FormField::UpiId);
        assert_eq!("cvv".parse::<FormField>().unwrap(), FormField::CardCvv);
        assert!("email".parse::<FormField>().is_err());
    }

    #[test]
    fn test_last4() {
        let card = CardDetails {
            number: "4111-1111-1111-9876".to_string(),
            ..CardDetails::default()
        };
        assert_eq!(card.last4(), "9876");
        assert_eq!(CardDetails::default().last4(), "");
    }
}
