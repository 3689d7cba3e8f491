//! Search API
//!
//! `GET /api/search?q=` over the in-memory index. The index is built at
//! startup; the admin refresh endpoint rebuilds it after catalog edits.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::services::{SearchEntry, search::build_corpus};
use crate::utils::{ApiResponse, AppResult};
use shared::request::SearchQuery;

/// Public storefront routes
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/search", get(search))
}

/// Admin console routes
pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/search/refresh", post(refresh))
}

async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<SearchEntry>>>> {
    // Lazy build covers queries racing the startup warmup.
    if !state.search.is_built() {
        let corpus = build_corpus(&state.db).await?;
        state.search.init(corpus);
    }
    Ok(Json(ApiResponse::success(state.search.search(&query.q))))
}

#[derive(Serialize)]
struct RefreshResponse {
    entries: usize,
}

async fn refresh(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<RefreshResponse>>> {
    let corpus = build_corpus(&state.db).await?;
    let entries = corpus.len();
    state.search.refresh(corpus);
    tracing::info!(entries, "Search index refreshed");
    Ok(Json(ApiResponse::success(RefreshResponse { entries })))
}
