//! Admin dashboard API
//!
//! Thin pass-through to the spreadsheet backend: dashboard aggregates,
//! the sheet's own order log, and analytics. Backend failures map to 503
//! so the console can show a retryable state.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde_json::Value;
use sheets_client::CallOutcome;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult};

/// Admin console routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/dashboard", get(dashboard))
        .route("/api/admin/analytics", get(analytics))
        .route("/api/admin/sheet-orders", get(sheet_orders))
}

fn unwrap_outcome(outcome: CallOutcome) -> AppResult<Json<ApiResponse<Value>>> {
    if !outcome.success {
        return Err(AppError::network(
            outcome
                .error
                .unwrap_or_else(|| "Spreadsheet backend unavailable".to_string()),
        ));
    }
    Ok(Json(ApiResponse::success(
        outcome.data.unwrap_or(Value::Null),
    )))
}

async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    unwrap_outcome(state.sheets.dashboard().await)
}

async fn analytics(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    unwrap_outcome(state.sheets.analytics().await)
}

async fn sheet_orders(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Value>>> {
    unwrap_outcome(state.sheets.orders().await)
}
