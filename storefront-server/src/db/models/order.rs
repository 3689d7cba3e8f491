//! Order model matching the database schema
//!
//! Item lines and the customer block are plain value types shared with the
//! API layer; only record references differ.

use serde::{Deserialize, Serialize};
use shared::models::{Customer, OrderItem, OrderStatus};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub session_id: String,
    pub restaurant: RecordId,
    /// Name frozen at checkout; restaurant renames don't rewrite history
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
