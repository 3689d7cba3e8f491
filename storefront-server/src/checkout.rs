//! WhatsApp checkout hand-off
//!
//! Order submission is a pre-filled WhatsApp message, not an API call: the
//! cart is frozen into an order snapshot, rendered into a fixed
//! human-readable template, and wrapped in a `wa.me` deep link against the
//! configured order number.

use rust_decimal::prelude::*;
use shared::cart::Cart;
use shared::models::{Customer, Order, OrderItem, OrderStatus};

/// Freeze a cart into an order snapshot.
///
/// Callers guarantee the cart is non-empty and bound to a restaurant;
/// missing binding falls back to empty strings rather than panicking.
pub fn order_from_cart(cart: &Cart, session_id: &str, customer: Customer, now: i64) -> Order {
    let items = cart
        .items
        .iter()
        .map(|line| OrderItem {
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            line_total: line_total(line.price, line.quantity),
        })
        .collect();

    Order {
        id: None,
        session_id: session_id.to_string(),
        restaurant_id: cart.restaurant_id.clone().unwrap_or_default(),
        restaurant_name: cart.restaurant_name.clone().unwrap_or_default(),
        items,
        customer,
        subtotal: cart.subtotal,
        tax: cart.tax,
        delivery_fee: cart.delivery_fee,
        total: cart.total,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: None,
    }
}

/// Render the fixed order template.
///
/// Reproduces item names, quantities, per-line prices and all totals, plus
/// the customer block, in the exact shape the restaurant reads on their
/// phone.
pub fn order_message(order: &Order) -> String {
    let mut message = format!("*New Order: {}*\n\n", order.restaurant_name);

    for item in &order.items {
        message.push_str(&format!(
            "- {} x{} @ {} = {}\n",
            item.name,
            item.quantity,
            rupees(item.price),
            rupees(item.line_total),
        ));
    }

    message.push_str(&format!(
        "\nSubtotal: {}\nTax: {}\nDelivery: {}\n*Total: {}*\n",
        rupees(order.subtotal),
        rupees(order.tax),
        rupees(order.delivery_fee),
        rupees(order.total),
    ));

    message.push_str(&format!(
        "\nName: {}\nPhone: {}\nAddress: {}\n",
        order.customer.name, order.customer.phone, order.customer.address,
    ));

    message
}

/// Build the `wa.me` deep link for the message.
///
/// `None` when no order number is configured; checkout then falls back to
/// "contact via WhatsApp directly" on the client.
pub fn whatsapp_link(order_number: &str, message: &str) -> Option<String> {
    let digits: String = order_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    reqwest::Url::parse_with_params(&format!("https://wa.me/{digits}"), [("text", message)])
        .ok()
        .map(String::from)
}

fn line_total(price: f64, quantity: u32) -> f64 {
    let total = Decimal::from_f64(price).unwrap_or(Decimal::ZERO) * Decimal::from(quantity);
    total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn rupees(amount: f64) -> String {
    format!("₹{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::cart::{CartItemInput, PricingConfig};

    fn customer() -> Customer {
        Customer {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    fn sample_order() -> Order {
        let mut cart = Cart::default();
        let pricing = PricingConfig::default();
        cart.add_item(
            CartItemInput {
                name: "Paneer Tikka".to_string(),
                price: 220.0,
            },
            "r1",
            "Spice Hub",
            &pricing,
        )
        .unwrap();
        cart.update_quantity("Paneer Tikka", 2, &pricing).unwrap();
        order_from_cart(&cart, "s1", customer(), 1_700_000_000_000)
    }

    #[test]
    fn snapshot_freezes_lines_and_totals() {
        let order = sample_order();
        assert_eq!(order.restaurant_id, "r1");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].line_total, 440.0);
        assert_eq!(order.subtotal, 440.0);
        assert_eq!(order.total, order.subtotal + order.tax + order.delivery_fee);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn message_reproduces_items_totals_and_customer() {
        let order = sample_order();
        let message = order_message(&order);

        assert!(message.contains("*New Order: Spice Hub*"));
        assert!(message.contains("- Paneer Tikka x2 @ ₹220.00 = ₹440.00"));
        assert!(message.contains("Subtotal: ₹440.00"));
        assert!(message.contains("Tax: ₹22.00"));
        assert!(message.contains("Delivery: ₹40.00"));
        assert!(message.contains("*Total: ₹502.00*"));
        assert!(message.contains("Name: Asha Rao"));
        assert!(message.contains("Phone: 9876543210"));
        assert!(message.contains("Address: 12 MG Road, Bengaluru"));
    }

    #[test]
    fn link_targets_the_configured_number_and_encodes_the_text() {
        let url = whatsapp_link("+91 98765 43210", "Order: Paneer Tikka x2").unwrap();
        assert!(url.starts_with("https://wa.me/919876543210?text="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn link_is_absent_without_a_configured_number() {
        assert_eq!(whatsapp_link("", "hello"), None);
        assert_eq!(whatsapp_link("no digits here", "hello"), None);
    }
}
