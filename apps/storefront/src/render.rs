//! # Text Rendering
//!
//! Turns command responses into the lines printed by the REPL.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Cart (3)                                │
//! │  Margherita Pizza   x2        ₹598.00    │
//! │  Veggie Burger      x1        ₹179.00    │
//! │  ─────────────────────────────────────   │
//! │  Subtotal                     ₹777.00    │
//! │  Discount WELCOME10 (10% off) -₹77.70    │
//! │  Total                        ₹699.30    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Pure string building: nothing here touches stdout.

use storefront_core::{FormState, PaymentMethod};

use crate::commands::{CartResponse, CheckoutResponse, MenuResponse, OrderPlacedResponse};
use crate::error::ApiError;
use crate::state::{ConfigState, Section, ViewState};

const RULE: &str = "----------------------------------------";

pub fn menu(menu: &MenuResponse, config: &ConfigState) -> String {
    let mut lines = vec![format!("{} menu", menu.store_name), RULE.to_string()];

    for product in &menu.products {
        let tag = product
            .tag
            .as_deref()
            .map(|t| format!("  [{}]", t))
            .unwrap_or_default();
        lines.push(format!(
            "{:<4}{:<22}{:>10}{}",
            product.id,
            product.name,
            config.format_currency(product.price),
            tag
        ));
        lines.push(format!("    {}", product.description));
    }

    lines.join("\n")
}

pub fn cart(cart: &CartResponse, config: &ConfigState) -> String {
    let mut lines = vec![format!("Cart ({})", cart.badge_count), RULE.to_string()];

    if cart.items.is_empty() {
        lines.push("Your cart is empty".to_string());
    }

    for item in &cart.items {
        lines.push(format!(
            "{:<4}{:<22}x{:<4}{:>10}",
            item.product_id,
            item.name,
            item.quantity,
            config.format_currency(item.line_total())
        ));
    }

    lines.push(RULE.to_string());
    lines.extend(totals(&cart.summary, config));

    if !cart.coupon_code.is_empty() {
        lines.push(format!("Coupon field: {}", cart.coupon_code));
    }

    lines.join("\n")
}

fn totals(summary: &storefront_core::PriceSummary, config: &ConfigState) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<30}{:>10}",
        "Subtotal",
        config.format_currency(summary.subtotal)
    )];

    if summary.discount.amount.is_positive() {
        lines.push(format!(
            "{:<30}{:>10}",
            format!("Discount {}", summary.discount.label),
            format!("-{}", config.format_currency(summary.discount.amount))
        ));
    }

    lines.push(format!(
        "{:<30}{:>10}",
        "Total",
        config.format_currency(summary.total)
    ));
    lines
}

pub fn checkout(checkout: &CheckoutResponse, config: &ConfigState) -> String {
    let form = &checkout.form;
    let mut lines = vec![
        "Delivery Details".to_string(),
        format!("  name:    {}", form.name),
        format!("  phone:   {}", form.phone),
        format!("  address: {}", form.address),
        "Payment Method".to_string(),
    ];

    for method in PaymentMethod::ALL {
        let marker = if method == form.payment_method { "(*)" } else { "( )" };
        lines.push(format!(
            "  {} {:<18} pay {}",
            marker,
            method.label(),
            method.to_string().to_lowercase()
        ));
    }

    match form.payment_method {
        PaymentMethod::Cod => {}
        PaymentMethod::Upi => lines.push(format!("  upi:     {}", form.upi_id)),
        PaymentMethod::Card => {
            lines.push(format!("  card:    {}", mask(&form.card.number)));
            lines.push(format!("  name:    {}", form.card.name));
            lines.push(format!("  expiry:  {}", form.card.expiry));
            lines.push(format!("  cvv:     {}", "*".repeat(form.card.cvv.chars().count())));
        }
    }

    lines.push(RULE.to_string());
    lines.push(format!("Items: {}", checkout.item_count));
    lines.extend(totals(&checkout.summary, config));

    if checkout.state == FormState::Success {
        lines.push("Last order placed. Edit any field to start a new one.".to_string());
    }

    lines.join("\n")
}

/// Shows only the last four digits.
fn mask(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    let shown = digits.len().min(4);
    let hidden = digits.len() - shown;
    let tail: String = digits[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}

pub fn order_placed(placed: &OrderPlacedResponse) -> String {
    format!("{}\nOrder id: {}", placed.notice, placed.order.id)
}

pub fn view(view: ViewState) -> String {
    format!(
        "Cart drawer {}, viewing {}",
        if view.cart_open { "open" } else { "closed" },
        section(view.section)
    )
}

pub fn section(section: Section) -> &'static str {
    match section {
        Section::Top => "top",
        Section::Menu => "menu",
        Section::Checkout => "checkout",
    }
}

pub fn error(err: &ApiError) -> String {
    format!("! {}", err.message)
}

pub fn help() -> String {
    [
        "Commands:",
        "  menu                 list dishes",
        "  cart                 show cart",
        "  open | close         open or close the cart drawer",
        "  add <id>             add one unit of a dish",
        "  inc <id> | dec <id>  change quantity",
        "  rm <id>              remove a line",
        "  code <text>          type into the coupon field",
        "  apply [<text>]       apply the coupon field (or <text>)",
        "  set <field> <value>  name, phone, address, upi, card number,",
        "                       name on card, expiry, cvv",
        "  pay cod|card|upi     choose payment method",
        "  checkout             go to checkout",
        "  place                place order",
        "  help | quit",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart as cart_cmd, catalog, checkout as checkout_cmd, coupon};
    use crate::error::ErrorCode;
    use crate::state::Storefront;

    #[test]
    fn test_menu_shows_prices_and_tags() {
        let store = Storefront::default();
        let config = ConfigState::default();
        let text = menu(&catalog::get_menu(&store, &config), &config);

        assert!(text.starts_with("RestoShop menu"));
        assert!(text.contains("Margherita Pizza"));
        assert!(text.contains("₹299.00"));
        assert!(text.contains("[New]"));
    }

    #[test]
    fn test_cart_with_discount() {
        let mut store = Storefront::default();
        let config = ConfigState::default();
        cart_cmd::add_to_cart(&mut store, "p1").unwrap();
        coupon::set_coupon_code(&mut store, "welcome10");
        coupon::apply_coupon(&mut store).unwrap();

        let text = cart(&store.snapshot(), &config);

        assert!(text.contains("Cart (1)"));
        assert!(text.contains("Discount WELCOME10 (10% off)"));
        assert!(text.contains("-₹29.90"));
        assert!(text.contains("₹269.10"));
    }

    #[test]
    fn test_empty_cart() {
        let mut store = Storefront::default();
        let text = cart(&store.snapshot(), &ConfigState::default());
        assert!(text.contains("Your cart is empty"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn test_checkout_masks_card() {
        let mut store = Storefront::default();
        checkout_cmd::select_payment(&mut store, "card").unwrap();
        checkout_cmd::update_form(&mut store, "card number", "4111 1111 1111 1234").unwrap();
        checkout_cmd::update_form(&mut store, "cvv", "987").unwrap();

        let text = checkout(&checkout_cmd::get_checkout(&mut store), &ConfigState::default());

        assert!(text.contains("************1234"));
        assert!(text.contains("cvv:     ***"));
        assert!(!text.contains("987"));
    }

    #[test]
    fn test_checkout_lists_payment_methods() {
        let mut store = Storefront::default();
        checkout_cmd::select_payment(&mut store, "upi").unwrap();

        let text = checkout(&checkout_cmd::get_checkout(&mut store), &ConfigState::default());

        assert!(text.contains("( ) Cash on Delivery"));
        assert!(text.contains("( ) Credit/Debit Card"));
        assert!(text.contains("(*) UPI"));
        assert!(text.contains("pay cod"));
    }

    #[test]
    fn test_mask_short_numbers() {
        assert_eq!(mask("12"), "12");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_error_line() {
        let err = ApiError::new(ErrorCode::CouponError, "Invalid coupon code: XYZ");
        assert_eq!(error(&err), "! Invalid coupon code: XYZ");
    }
}
