//! Push notification delivery
//!
//! Thin client over the external messaging provider: it takes device
//! tokens and a `{title, body, data}` payload and reports per-token
//! success/failure counts. Delivery problems surface in the counts, never
//! as errors; a down provider must not fail the admin action outright.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

use shared::error::{AppError, AppResult};

use crate::core::Config;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Per-send delivery report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PushReport {
    pub sent: u32,
    pub failed: u32,
}

#[derive(Clone)]
pub struct PushService {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PushService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build push client: {e}")))?;
        Ok(Self {
            http,
            endpoint: config.push_endpoint.clone(),
            api_key: config.push_api_key.clone(),
        })
    }

    /// Fan the payload out to the given tokens.
    pub async fn send(&self, tokens: &[String], payload: &PushPayload) -> PushReport {
        if tokens.is_empty() {
            return PushReport::default();
        }

        let body = json!({
            "tokens": tokens,
            "notification": {
                "title": payload.title,
                "body": payload.body,
            },
            "data": payload.data,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let all_failed = PushReport {
            sent: 0,
            failed: tokens.len() as u32,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Push provider unreachable: {e}");
                return all_failed;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Push provider rejected the request");
            return all_failed;
        }

        match response.json::<Value>().await {
            Ok(value) => parse_report(&value, tokens.len() as u32),
            Err(e) => {
                tracing::warn!("Unreadable push provider response: {e}");
                all_failed
            }
        }
    }
}

/// Read the provider's counts leniently: either top-level `success` /
/// `failure` numbers or a `results` array with per-token `success` flags.
fn parse_report(value: &Value, token_count: u32) -> PushReport {
    if let (Some(sent), Some(failed)) = (
        value.get("success").and_then(Value::as_u64),
        value.get("failure").and_then(Value::as_u64),
    ) {
        return PushReport {
            sent: sent as u32,
            failed: failed as u32,
        };
    }

    if let Some(results) = value.get("results").and_then(Value::as_array) {
        let sent = results
            .iter()
            .filter(|r| r.get("success").and_then(Value::as_bool) == Some(true))
            .count() as u32;
        return PushReport {
            sent,
            failed: token_count.saturating_sub(sent),
        };
    }

    // 2xx with no recognizable shape: assume everything went out.
    PushReport {
        sent: token_count,
        failed: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_count_shaped_responses() {
        let report = parse_report(&json!({"success": 3, "failure": 1}), 4);
        assert_eq!(report.sent, 3);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn reads_result_array_responses() {
        let report = parse_report(
            &json!({"results": [{"success": true}, {"success": false}, {"success": true}]}),
            3,
        );
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn unknown_shapes_count_as_delivered() {
        let report = parse_report(&json!({"ok": true}), 2);
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 0);
    }
}
