//! Menu item model matching the database schema

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Owning restaurant
    pub restaurant: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

fn default_true() -> bool {
    true
}
