//! Order Model
//!
//! An order is an immutable snapshot of a cart plus the customer who placed
//! it. After creation only the status moves, and only through admin actions.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether moving to `next` is a legal admin transition.
    ///
    /// `delivered` and `cancelled` are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Delivered)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

/// Customer details captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// One order line, frozen from the cart at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Browsing session that placed the order
    pub session_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Admin status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Delivered));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_reject_everything() {
        use OrderStatus::*;
        for next in [Pending, Confirmed, Delivered, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn no_skipping_confirmation() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    }
}
