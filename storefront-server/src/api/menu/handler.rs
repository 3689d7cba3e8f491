//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, RestaurantRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_price, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

const RESOURCE: &str = "menu_item";

/// Storefront menu of one restaurant (available items only)
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    // 404 on unknown restaurant rather than an empty menu.
    RestaurantRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let items = MenuItemRepository::new(state.db.clone())
        .find_available_by_restaurant(&id)
        .await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(convert::menu_item).collect(),
    )))
}

/// Admin listing across restaurants, including unavailable items
pub async fn admin_list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let items = MenuItemRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(convert::menu_item).collect(),
    )))
}

fn validate_create(payload: &MenuItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_price(payload.price, "price")?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

fn validate_update(payload: &MenuItemUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

/// Create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    validate_create(&payload)?;

    // The owning restaurant must exist.
    RestaurantRepository::new(state.db.clone())
        .find_by_id(&payload.restaurant)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let created = MenuItemRepository::new(state.db.clone())
        .create(payload)
        .await?;
    let item = convert::menu_item(created);

    let id = item.id.clone().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&item));
    Ok(Json(ApiResponse::success(item)))
}

/// Update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    validate_update(&payload)?;

    let updated = MenuItemRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    let item = convert::menu_item(updated);

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&item));
    Ok(Json(ApiResponse::success(item)))
}

/// Delete a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !MenuItemRepository::new(state.db.clone()).delete(&id).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    Ok(Json(ApiResponse::ok()))
}
