//! Offer model matching the database schema

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: Option<String>,
    /// Absent = storewide offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RecordId>,
    pub discount_percent: f64,
    pub valid_from: i64,
    pub valid_until: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

fn default_true() -> bool {
    true
}
