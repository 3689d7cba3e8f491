//! Restaurant Model

use serde::{Deserialize, Serialize};

use crate::availability::{self, Availability, GlobalOverride, ManualOverride};
use crate::time::TimeData;

/// Lifecycle status controlled by the platform admin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    #[default]
    Active,
    Suspended,
}

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    /// Daily opening time (HH:MM, business timezone)
    pub opens_at: String,
    /// Daily closing time (HH:MM); earlier than `opens_at` means the
    /// window spans midnight
    pub closes_at: String,
    /// Manual override: `true` forces open, `false` forces closed,
    /// absent means follow the schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub admin_status: AdminStatus,
    /// Storefront ordering weight (higher first); also the search tie-break
    #[serde(default)]
    pub priority: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Restaurant {
    /// Evaluate this restaurant's availability at the given time.
    pub fn availability(&self, global: GlobalOverride, time: &TimeData) -> Availability {
        availability::evaluate(
            &self.opens_at,
            &self.closes_at,
            ManualOverride::from(self.is_open),
            global,
            time,
        )
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub opens_at: String,
    pub closes_at: String,
    pub priority: Option<i32>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_status: Option<AdminStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// Manual override payload (`PUT /api/admin/restaurants/{id}/override`)
///
/// `is_open: null` clears the override back to schedule-driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
}
