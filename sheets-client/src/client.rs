//! The spreadsheet backend client

use serde_json::{Value, json};
use shared::models::Order;
use std::time::Duration;

use crate::config::SheetsConfig;
use crate::connectivity;
use crate::error::{ClientError, ClientResult};
use crate::retry::with_retry;
use crate::types::{Action, CallOutcome, NotificationLog};

/// How often the offline wait re-probes the origin
const ONLINE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Client for the legacy spreadsheet backend
///
/// Cheap to clone; the inner `reqwest::Client` is already shared.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
    origin: String,
}

impl SheetsClient {
    /// Create a new client from configuration
    pub fn new(config: SheetsConfig) -> ClientResult<Self> {
        let origin = origin_of(&config.endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            origin,
        })
    }

    /// Run one `{action, ...payload}` call through the retry loop.
    ///
    /// Never returns an error: the backend being down resolves to a failed
    /// [`CallOutcome`] so callers can degrade instead of unwinding.
    pub async fn call(&self, action: Action, payload: Value) -> CallOutcome {
        // Short-circuit the retry budget while definitely offline.
        if !connectivity::is_online(&self.http, &self.origin).await {
            tracing::warn!(action = action.name(), "Backend origin unreachable, waiting");
            let deadline = self.config.retry.total_delay().max(Duration::from_secs(5));
            if !connectivity::wait_for_online(&self.http, &self.origin, ONLINE_POLL_INTERVAL, deadline)
                .await
            {
                return CallOutcome::fail(ClientError::Offline.to_string());
            }
        }

        let body = match build_body(action, payload) {
            Ok(body) => body,
            Err(err) => return CallOutcome::fail(err.to_string()),
        };

        let result = with_retry(&self.config.retry, |_attempt| {
            let body = body.clone();
            async move { self.request_once(&body).await }
        })
        .await;

        match result {
            Ok(value) => CallOutcome::ok(value),
            Err(err) => {
                tracing::error!(action = action.name(), "Backend call failed: {err}");
                CallOutcome::fail(err.to_string())
            }
        }
    }

    /// One attempt: POST the body, enforce the per-attempt timeout, check
    /// the HTTP status and the backend's `success` flag.
    async fn request_once(&self, body: &Value) -> ClientResult<Value> {
        let timeout_secs = self.config.timeout.as_secs();
        let attempt = async {
            let response = self
                .http
                .post(&self.config.endpoint)
                .json(body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status(status.as_u16()));
            }

            let value: Value = response.json().await?;
            Ok(value)
        };

        let value = tokio::time::timeout(self.config.timeout, attempt)
            .await
            .map_err(|_| ClientError::Timeout(timeout_secs))??;

        match value.get("success").and_then(Value::as_bool) {
            Some(false) => {
                let message = value
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown backend error");
                Err(ClientError::Backend(message.to_string()))
            }
            Some(true) => {
                // Hand back the payload without the protocol flag.
                let mut value = value;
                if let Some(map) = value.as_object_mut() {
                    map.remove("success");
                }
                Ok(value)
            }
            None => Err(ClientError::InvalidResponse(
                "missing success flag".to_string(),
            )),
        }
    }

    // ========== Typed actions ==========

    /// Aggregate numbers for the admin dashboard
    pub async fn get_dashboard_data(&self) -> CallOutcome {
        self.call(Action::GetDashboardData, json!({})).await
    }

    /// Orders as recorded in the sheet
    pub async fn get_orders(&self) -> CallOutcome {
        self.call(Action::GetOrders, json!({})).await
    }

    /// Append a placed order to the sheet
    pub async fn add_order(&self, order: &Order) -> CallOutcome {
        match serde_json::to_value(order) {
            Ok(value) => self.call(Action::AddOrder, json!({ "order": value })).await,
            Err(err) => CallOutcome::fail(format!("Failed to serialize order: {err}")),
        }
    }

    /// Sales analytics
    pub async fn get_analytics(&self) -> CallOutcome {
        self.call(Action::GetAnalytics, json!({})).await
    }

    /// Ask the script to generate an invoice for the order
    pub async fn trigger_invoice(&self, order_id: &str) -> CallOutcome {
        self.call(Action::TriggerInvoice, json!({ "orderId": order_id }))
            .await
    }

    /// Record a push-notification send in the log sheet
    pub async fn log_notification(&self, log: &NotificationLog) -> CallOutcome {
        match serde_json::to_value(log) {
            Ok(value) => {
                self.call(Action::LogNotification, json!({ "notification": value }))
                    .await
            }
            Err(err) => CallOutcome::fail(format!("Failed to serialize log entry: {err}")),
        }
    }
}

/// Merge the action name into the payload object.
fn build_body(action: Action, payload: Value) -> ClientResult<Value> {
    let mut body = match payload {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(ClientError::Config(format!(
                "payload must be a JSON object, got {other}"
            )));
        }
    };
    body.insert("action".to_string(), Value::String(action.name().to_string()));
    Ok(Value::Object(body))
}

/// `scheme://host[:port]` of the endpoint, used for connectivity probes.
fn origin_of(endpoint: &str) -> ClientResult<String> {
    let url = reqwest::Url::parse(endpoint)
        .map_err(|e| ClientError::Config(format!("Invalid endpoint URL: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::Config("Endpoint URL has no host".to_string()))?;
    let origin = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };
    Ok(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_the_action_and_payload() {
        let body = build_body(Action::TriggerInvoice, json!({"orderId": "o1"})).unwrap();
        assert_eq!(body["action"], "triggerInvoice");
        assert_eq!(body["orderId"], "o1");
    }

    #[test]
    fn null_payload_becomes_a_bare_action() {
        let body = build_body(Action::GetOrders, Value::Null).unwrap();
        assert_eq!(body, json!({"action": "getOrders"}));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(build_body(Action::GetOrders, json!([1, 2])).is_err());
    }

    #[test]
    fn origin_strips_the_path() {
        assert_eq!(
            origin_of("https://script.example.com/macros/s/XXX/exec").unwrap(),
            "https://script.example.com"
        );
        assert_eq!(
            origin_of("http://localhost:8090/exec").unwrap(),
            "http://localhost:8090"
        );
        assert!(origin_of("not a url").is_err());
    }
}
