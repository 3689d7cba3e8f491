//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, RestaurantRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    validate_hhmm, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::availability::Availability;
use shared::models::{OverrideUpdate, Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::time::TimeData;

const RESOURCE: &str = "restaurant";

/// Restaurant plus its live open/closed verdict
#[derive(Debug, Serialize)]
pub struct RestaurantWithAvailability {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub availability: Availability,
}

fn with_availability(state: &ServerState, restaurant: Restaurant) -> RestaurantWithAvailability {
    // Evaluate live rather than reading the watcher cache: verdicts flip
    // at minute boundaries and the evaluation is a pure function anyway.
    let time = TimeData::now_in(state.config.timezone);
    let availability = restaurant.availability(state.system_config.global_override(), &time);
    RestaurantWithAvailability {
        restaurant,
        availability,
    }
}

/// Storefront listing: active restaurants with availability, priority order
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantWithAvailability>>>> {
    let restaurants = RestaurantRepository::new(state.db.clone())
        .find_active()
        .await?;
    let items = restaurants
        .into_iter()
        .map(|r| with_availability(&state, convert::restaurant(r)))
        .collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Storefront detail
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RestaurantWithAvailability>>> {
    let restaurant = RestaurantRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(Json(ApiResponse::success(with_availability(
        &state,
        convert::restaurant(restaurant),
    ))))
}

/// Admin listing: everything, including suspended restaurants
pub async fn admin_list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Restaurant>>>> {
    let restaurants = RestaurantRepository::new(state.db.clone())
        .find_all()
        .await?;
    Ok(Json(ApiResponse::success(
        restaurants.into_iter().map(convert::restaurant).collect(),
    )))
}

fn validate_create(payload: &RestaurantCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_hhmm(&payload.opens_at, "opens_at")?;
    validate_hhmm(&payload.closes_at, "closes_at")?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.cuisine, "cuisine", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

fn validate_update(payload: &RestaurantUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(opens_at) = &payload.opens_at {
        validate_hhmm(opens_at, "opens_at")?;
    }
    if let Some(closes_at) = &payload.closes_at {
        validate_hhmm(closes_at, "closes_at")?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.cuisine, "cuisine", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

/// Create a restaurant
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    validate_create(&payload)?;

    let created = RestaurantRepository::new(state.db.clone())
        .create(payload)
        .await?;
    let restaurant = convert::restaurant(created);

    let id = restaurant.id.clone().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&restaurant));
    Ok(Json(ApiResponse::success(restaurant)))
}

/// Update a restaurant
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    validate_update(&payload)?;

    let updated = RestaurantRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    let restaurant = convert::restaurant(updated);

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&restaurant));
    // Schedule edits can change the verdict right now.
    state.config_notify.notify_waiters();
    Ok(Json(ApiResponse::success(restaurant)))
}

/// Set or clear the manual open/closed override
pub async fn set_override(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OverrideUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let updated = RestaurantRepository::new(state.db.clone())
        .set_override(&id, payload.is_open)
        .await?;
    let restaurant = convert::restaurant(updated);

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&restaurant));
    state.config_notify.notify_waiters();
    Ok(Json(ApiResponse::success(restaurant)))
}

/// Delete a restaurant and its menu
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    if !repo.delete(&id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }
    MenuItemRepository::new(state.db.clone())
        .delete_by_restaurant(&id)
        .await?;

    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    Ok(Json(ApiResponse::ok()))
}
