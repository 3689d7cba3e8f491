//! Order API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Public storefront routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout", post(handler::checkout))
        .route("/api/orders/history", get(handler::history))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::admin_list))
        .route("/api/admin/orders/{id}/status", put(handler::update_status))
        .route(
            "/api/admin/orders/{id}/invoice",
            post(handler::trigger_invoice),
        )
}
