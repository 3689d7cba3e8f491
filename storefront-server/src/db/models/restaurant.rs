//! Restaurant model matching the database schema

use serde::{Deserialize, Serialize};
use shared::models::AdminStatus;
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub opens_at: String,
    pub closes_at: String,
    /// Tri-state manual override; absent = follow schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub admin_status: AdminStatus,
    #[serde(default)]
    pub priority: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}
