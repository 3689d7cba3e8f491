//! Spreadsheet backend facade
//!
//! Server-side view over `sheets-client`: order forwarding, dashboard and
//! analytics reads, invoice triggers and the notification log. Forwarding
//! is best-effort by design; an unreachable backend never blocks checkout
//! because the WhatsApp hand-off is the real submission channel.

use sheets_client::{CallOutcome, NotificationLog, SheetsClient, SheetsConfig};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;

use crate::core::Config;
use crate::db::models::Order;

#[derive(Clone)]
pub struct SheetsService {
    client: SheetsClient,
}

impl SheetsService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = SheetsClient::new(SheetsConfig::new(&config.sheets_endpoint))
            .map_err(|e| AppError::with_message(ErrorCode::ConfigInvalid, e.to_string()))?;
        Ok(Self { client })
    }

    /// Append the order to the sheet. Returns whether it landed.
    pub async fn forward_order(&self, order: &Order) -> bool {
        let api_order = crate::api::convert::order(order.clone());
        let outcome = self.client.add_order(&api_order).await;
        if !outcome.success {
            tracing::warn!(
                order = ?order.id,
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "Order forward to spreadsheet failed; order remains available locally"
            );
        }
        outcome.success
    }

    pub async fn dashboard(&self) -> CallOutcome {
        self.client.get_dashboard_data().await
    }

    pub async fn orders(&self) -> CallOutcome {
        self.client.get_orders().await
    }

    pub async fn analytics(&self) -> CallOutcome {
        self.client.get_analytics().await
    }

    pub async fn trigger_invoice(&self, order_id: &str) -> CallOutcome {
        self.client.trigger_invoice(order_id).await
    }

    /// Best-effort log of a push send; failures only warn.
    pub async fn log_notification(&self, title: &str, body: Option<&str>, sent: u32, failed: u32) {
        let log = NotificationLog {
            title: title.to_string(),
            body: body.map(str::to_string),
            sent,
            failed,
            at: now_millis(),
        };
        let outcome = self.client.log_notification(&log).await;
        if !outcome.success {
            tracing::warn!(
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "Failed to log notification send"
            );
        }
    }
}
