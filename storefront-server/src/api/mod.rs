//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`restaurants`] - storefront listing + admin CRUD and overrides
//! - [`menu`] - storefront menus + admin CRUD
//! - [`offers`] - live offers + admin CRUD
//! - [`cart`] - session cart operations
//! - [`orders`] - checkout, history, admin order management
//! - [`search`] - storefront search + admin index refresh
//! - [`system_config`] - the admin config singleton
//! - [`notifications`] - device registration + admin push sends
//! - [`dashboard`] - spreadsheet-backed dashboard/analytics
//! - [`events`] - server-sent sync event stream
//!
//! Everything under `/api/admin` sits behind the bearer-token guard.

pub mod convert;
pub mod session;

pub mod cart;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod menu;
pub mod notifications;
pub mod offers;
pub mod orders;
pub mod restaurants;
pub mod search;
pub mod system_config;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .merge(restaurants::admin_router())
        .merge(menu::admin_router())
        .merge(offers::admin_router())
        .merge(orders::admin_router())
        .merge(search::admin_router())
        .merge(notifications::admin_router())
        .merge(system_config::router())
        .merge(dashboard::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .merge(health::router())
        .merge(restaurants::router())
        .merge(menu::router())
        .merge(offers::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(search::router())
        .merge(notifications::router())
        .merge(events::router())
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
