//! Notification API
//!
//! Devices register their push tokens on the public route; the admin
//! route fans a payload out to every registered device and reports
//! per-token delivery counts. Sends are logged to the spreadsheet backend
//! best-effort.

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::DeviceTokenRepository;
use crate::services::{PushPayload, PushReport};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_TOKEN_LEN, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{DeviceToken, DeviceTokenRegister};

/// Public routes (devices register themselves)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/notifications/register", post(register))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/notifications", post(send))
}

async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<DeviceTokenRegister>,
) -> AppResult<Json<ApiResponse<DeviceToken>>> {
    validate_required_text(&payload.token, "token", MAX_TOKEN_LEN)?;

    let registered = DeviceTokenRepository::new(state.db.clone())
        .upsert(payload)
        .await?;
    Ok(Json(ApiResponse::success(convert::device_token(
        registered,
    ))))
}

#[derive(Debug, Deserialize)]
pub struct NotificationSend {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: Option<Value>,
}

async fn send(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationSend>,
) -> AppResult<Json<ApiResponse<PushReport>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.body, "body", MAX_NOTE_LEN)?;

    let tokens: Vec<String> = DeviceTokenRepository::new(state.db.clone())
        .find_all()
        .await?
        .into_iter()
        .map(|t| t.token)
        .collect();
    if tokens.is_empty() {
        return Err(AppError::new(ErrorCode::NoDeviceTokens));
    }

    let push_payload = PushPayload {
        title: payload.title.clone(),
        body: payload.body.clone(),
        data: payload.data,
    };
    let report = state.push.send(&tokens, &push_payload).await;

    tracing::info!(sent = report.sent, failed = report.failed, "Push send finished");
    state
        .sheets
        .log_notification(&payload.title, Some(&payload.body), report.sent, report.failed)
        .await;

    Ok(Json(ApiResponse::success(report)))
}
