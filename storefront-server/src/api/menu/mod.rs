//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Public storefront routes
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/restaurants/{id}/menu", get(handler::menu))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/menu-items",
            get(handler::admin_list).post(handler::create),
        )
        .route(
            "/api/admin/menu-items/{id}",
            put(handler::update).delete(handler::delete),
        )
}
