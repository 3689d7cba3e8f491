//! Offer API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Public storefront routes
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/offers", get(handler::list_valid))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/offers",
            get(handler::admin_list).post(handler::create),
        )
        .route(
            "/api/admin/offers/{id}",
            put(handler::update).delete(handler::delete),
        )
}
