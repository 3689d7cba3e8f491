//! Restaurant API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Public storefront routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants", get(handler::list))
        .route("/api/restaurants/{id}", get(handler::get))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/restaurants",
            get(handler::admin_list).post(handler::create),
        )
        .route(
            "/api/admin/restaurants/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route(
            "/api/admin/restaurants/{id}/override",
            put(handler::set_override),
        )
}
