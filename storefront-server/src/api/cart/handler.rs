//! Cart API Handlers
//!
//! The cart is server-authoritative: adds name a restaurant and a menu
//! item, prices come from the catalog, and the single-restaurant invariant
//! is enforced by the cart model itself. A cross-restaurant add returns a
//! conflict carrying the current restaurant so the client can ask the user
//! before clearing.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::api::session::SessionId;
use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, RestaurantRepository};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::cart::{Cart, CartItemInput};
use shared::models::AdminStatus;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub restaurant_id: String,
    pub item_name: String,
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

/// Current cart (empty if the session has none yet)
pub async fn get(
    State(state): State<ServerState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<Cart>>> {
    Ok(Json(ApiResponse::success(state.carts.get(&session.0)?)))
}

/// Add one unit of a menu item
pub async fn add_item(
    State(state): State<ServerState>,
    session: SessionId,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let restaurant = RestaurantRepository::new(state.db.clone())
        .find_by_id(&payload.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    if restaurant.admin_status != AdminStatus::Active {
        return Err(AppError::new(ErrorCode::RestaurantSuspended));
    }

    let item = MenuItemRepository::new(state.db.clone())
        .find_by_name(&payload.restaurant_id, &payload.item_name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    if !item.is_available {
        return Err(AppError::new(ErrorCode::MenuItemUnavailable));
    }

    // Bind the cart to the canonical record id, not whatever spelling the
    // client sent.
    let restaurant_id = item.restaurant.to_string();
    let cart = state.carts.add_item(
        &session.0,
        CartItemInput {
            name: item.name,
            price: item.price,
        },
        &restaurant_id,
        &restaurant.name,
    )?;
    Ok(Json(ApiResponse::success(cart)))
}

/// Set a line's quantity; zero or below removes the line
pub async fn update_quantity(
    State(state): State<ServerState>,
    session: SessionId,
    Path(name): Path<String>,
    Json(payload): Json<QuantityUpdate>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .carts
        .update_quantity(&session.0, &name, payload.quantity)?;
    Ok(Json(ApiResponse::success(cart)))
}

/// Remove a line
pub async fn remove_item(
    State(state): State<ServerState>,
    session: SessionId,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state.carts.remove_item(&session.0, &name)?;
    Ok(Json(ApiResponse::success(cart)))
}

/// Empty the cart
pub async fn clear(
    State(state): State<ServerState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = state.carts.clear(&session.0)?;
    Ok(Json(ApiResponse::success(cart)))
}
