//! Cart API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Session cart routes (public, scoped by `X-Session-Id`)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart", get(handler::get).delete(handler::clear))
        .route("/api/cart/items", post(handler::add_item))
        .route(
            "/api/cart/items/{name}",
            put(handler::update_quantity).delete(handler::remove_item),
        )
}
