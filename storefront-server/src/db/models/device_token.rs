//! Device token model matching the database schema

use serde::{Deserialize, Serialize};
use shared::models::Platform;
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub token: String,
    #[serde(default)]
    pub platform: Platform,
    pub registered_at: i64,
}
