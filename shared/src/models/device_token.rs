//! Device Token Model (push notification registrations)

use serde::{Deserialize, Serialize};

/// Device platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    #[default]
    Web,
}

/// Push registration entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    pub id: Option<String>,
    pub token: String,
    #[serde(default)]
    pub platform: Platform,
    pub registered_at: i64,
}

/// Register device payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTokenRegister {
    pub token: String,
    pub platform: Option<Platform>,
}
