//! Order API Handlers
//!
//! Checkout freezes the cart into an order snapshot, persists it, forwards
//! it to the spreadsheet backend best-effort, and hands back the WhatsApp
//! deep link that actually submits the order to the restaurant. A down
//! backend never loses the order: it is already persisted locally and the
//! link still works.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert;
use crate::api::session::SessionId;
use crate::checkout;
use crate::core::ServerState;
use crate::db::repository::{OrderRepository, RestaurantRepository, record_id};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_phone, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{AdminStatus, Customer, Order, OrderStatus, OrderStatusUpdate};
use shared::request::ListQuery;
use shared::response::PaginatedResponse;
use shared::time::{TimeData, format_hhmm};
use shared::util::now_millis;

const RESOURCE: &str = "orders";

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer: Customer,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    /// Pre-filled WhatsApp deep link; absent when no order number is
    /// configured (client falls back to "contact via WhatsApp directly")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
    /// Whether the spreadsheet backend accepted the copy
    pub forwarded: bool,
}

/// Place the session's cart as an order
pub async fn checkout(
    State(state): State<ServerState>,
    session: SessionId,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    let customer = payload.customer;
    validate_required_text(&customer.name, "name", MAX_NAME_LEN)?;
    validate_phone(&customer.phone, "phone")?;
    validate_required_text(&customer.address, "address", MAX_ADDRESS_LEN)?;

    let cart = state.carts.get(&session.0)?;
    if cart.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }
    let restaurant_id = cart
        .restaurant_id
        .clone()
        .ok_or_else(|| AppError::internal("Non-empty cart without restaurant binding"))?;

    let restaurant = RestaurantRepository::new(state.db.clone())
        .find_by_id(&restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    if restaurant.admin_status != AdminStatus::Active {
        return Err(AppError::new(ErrorCode::RestaurantSuspended));
    }

    // The restaurant must be open right now.
    let time = TimeData::now_in(state.config.timezone);
    let config = state.system_config.current();
    let verdict = convert::restaurant(restaurant).availability(config.global_override, &time);
    if !verdict.open {
        let mut err = AppError::new(ErrorCode::RestaurantClosed);
        if let Some(next_open) = verdict.next_open_minutes {
            err = err.with_detail("opens_at", format_hhmm(next_open));
        }
        return Err(err);
    }

    // Freeze and persist the snapshot.
    let snapshot = checkout::order_from_cart(&cart, &session.0, customer, now_millis());
    let record = crate::db::models::Order {
        id: None,
        session_id: snapshot.session_id.clone(),
        restaurant: record_id("restaurant", &snapshot.restaurant_id),
        restaurant_name: snapshot.restaurant_name.clone(),
        items: snapshot.items.clone(),
        customer: snapshot.customer.clone(),
        subtotal: snapshot.subtotal,
        tax: snapshot.tax,
        delivery_fee: snapshot.delivery_fee,
        total: snapshot.total,
        status: snapshot.status,
        created_at: snapshot.created_at,
        updated_at: None,
    };
    let created = OrderRepository::new(state.db.clone()).create(record).await?;

    // Best-effort copy into the legacy sheet; the order is already safe.
    let forwarded = state.sheets.forward_order(&created).await;

    let order = convert::order(created);
    let whatsapp_url = checkout::whatsapp_link(
        &config.whatsapp_order_number,
        &checkout::order_message(&order),
    );

    // The cart only clears once the order is durably persisted.
    state.carts.clear(&session.0)?;

    let id = order.id.clone().unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&order));

    Ok(Json(ApiResponse::success(CheckoutResponse {
        order,
        whatsapp_url,
        forwarded,
    })))
}

/// Order history of the calling session
pub async fn history(
    State(state): State<ServerState>,
    session: SessionId,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = OrderRepository::new(state.db.clone())
        .find_by_session(&session.0)
        .await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(convert::order).collect(),
    )))
}

/// Admin listing, paginated, optionally filtered by status
pub async fn admin_list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Order>>>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_status(raw)?),
    };

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_page(&query.pagination, status).await?;
    let total = repo.count(status).await?;

    let page = PaginatedResponse::new(
        orders.into_iter().map(convert::order).collect(),
        query.pagination.page,
        query.pagination.limit(),
        total,
    );
    Ok(Json(ApiResponse::success(page)))
}

/// Admin status transition
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !existing.status.can_transition_to(payload.status) {
        return Err(AppError::new(ErrorCode::OrderStatusInvalid)
            .with_detail("from", serde_json::json!(existing.status))
            .with_detail("to", serde_json::json!(payload.status)));
    }

    let updated = repo.update_status(&id, payload.status).await?;
    let order = convert::order(updated);

    state.broadcast_sync(RESOURCE, "updated", &id, Some(&order));
    Ok(Json(ApiResponse::success(order)))
}

/// Ask the spreadsheet backend to generate an invoice
pub async fn trigger_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    // Only delivered orders get invoices.
    let order = OrderRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    if order.status != OrderStatus::Delivered {
        return Err(AppError::business_rule(
            "Invoices can only be generated for delivered orders",
        ));
    }

    let outcome = state.sheets.trigger_invoice(&id).await;
    if !outcome.success {
        return Err(AppError::network(
            outcome.error.unwrap_or_else(|| "Invoice trigger failed".to_string()),
        ));
    }
    Ok(Json(ApiResponse::success(
        outcome.data.unwrap_or(serde_json::Value::Null),
    )))
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
        .map_err(|_| AppError::validation(format!("Unknown order status '{raw}'")))
}
