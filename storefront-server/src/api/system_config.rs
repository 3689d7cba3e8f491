//! System Config API (admin)
//!
//! The singleton behind the storefront: WhatsApp order number, the global
//! open/closed/auto override, and pricing parameters. Updates notify the
//! config-dependent background work so an override flip takes effect
//! immediately instead of at the next tick.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::core::ServerState;
use crate::utils::validation::validate_percent;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::{SystemConfig, SystemConfigUpdate};

const RESOURCE: &str = "system_config";

/// Admin console routes
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/admin/config",
        get(get_config).put(update_config),
    )
}

async fn get_config(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<SystemConfig>>> {
    Ok(Json(ApiResponse::success(state.system_config.current())))
}

async fn update_config(
    State(state): State<ServerState>,
    Json(payload): Json<SystemConfigUpdate>,
) -> AppResult<Json<ApiResponse<SystemConfig>>> {
    if let Some(rate) = payload.tax_rate_percent {
        validate_percent(rate, "tax_rate_percent")?;
    }
    if let Some(fee) = payload.delivery_fee
        && !(fee.is_finite() && fee >= 0.0)
    {
        return Err(AppError::validation("delivery_fee must be non-negative"));
    }
    if let Some(above) = payload.free_delivery_above
        && !(above.is_finite() && above >= 0.0)
    {
        return Err(AppError::validation(
            "free_delivery_above must be non-negative",
        ));
    }

    let config = state.system_config.update(payload)?;

    state.broadcast_sync(RESOURCE, "updated", "main", Some(&config));
    // Availability depends on the global override; re-check now.
    state.config_notify.notify_waiters();

    Ok(Json(ApiResponse::success(config)))
}
