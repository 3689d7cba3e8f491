//! Request/response types for the spreadsheet backend

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions understood by the backend script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetDashboardData,
    GetOrders,
    AddOrder,
    GetAnalytics,
    TriggerInvoice,
    LogNotification,
}

impl Action {
    /// Wire name of the action (camelCase, as the script expects)
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetDashboardData => "getDashboardData",
            Self::GetOrders => "getOrders",
            Self::AddOrder => "addOrder",
            Self::GetAnalytics => "getAnalytics",
            Self::TriggerInvoice => "triggerInvoice",
            Self::LogNotification => "logNotification",
        }
    }
}

/// Resolved result of one backend call
///
/// Calls never raise; the terminal failure carries the last error's
/// message. `data` is the raw backend answer minus the `success` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallOutcome {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Payload for the `logNotification` action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Tokens delivered successfully
    pub sent: u32,
    /// Tokens that failed
    pub failed: u32,
    /// Unix millis of the send
    pub at: i64,
}
