//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::{OfferRepository, RestaurantRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_percent, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Offer, OfferCreate, OfferUpdate};
use shared::util::now_millis;

const RESOURCE: &str = "offer";

/// Storefront listing: offers inside their validity window right now
pub async fn list_valid(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Offer>>>> {
    let offers = OfferRepository::new(state.db.clone())
        .find_valid(now_millis())
        .await?;
    Ok(Json(ApiResponse::success(
        offers.into_iter().map(convert::offer).collect(),
    )))
}

/// Admin listing: everything
pub async fn admin_list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Offer>>>> {
    let offers = OfferRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(ApiResponse::success(
        offers.into_iter().map(convert::offer).collect(),
    )))
}

/// Create an offer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OfferCreate>,
) -> AppResult<Json<ApiResponse<Offer>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_percent(payload.discount_percent, "discount_percent")?;
    if payload.valid_until <= payload.valid_from {
        return Err(AppError::with_message(
            ErrorCode::OfferWindowInvalid,
            "Offer must end after it starts",
        ));
    }
    if let Some(restaurant) = &payload.restaurant {
        RestaurantRepository::new(state.db.clone())
            .find_by_id(restaurant)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    }

    let created = OfferRepository::new(state.db.clone())
        .create(payload)
        .await?;
    let offer = convert::offer(created);

    let id = offer.id.clone().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&offer));
    Ok(Json(ApiResponse::success(offer)))
}

/// Update an offer
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OfferUpdate>,
) -> AppResult<Json<ApiResponse<Offer>>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(discount) = payload.discount_percent {
        validate_percent(discount, "discount_percent")?;
    }

    let updated = OfferRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    let offer = convert::offer(updated);

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&offer));
    Ok(Json(ApiResponse::success(offer)))
}

/// Delete an offer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !OfferRepository::new(state.db.clone()).delete(&id).await? {
        return Err(AppError::new(ErrorCode::OfferNotFound));
    }
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    Ok(Json(ApiResponse::ok()))
}
