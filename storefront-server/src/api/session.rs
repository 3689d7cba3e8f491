//! Browsing session extraction
//!
//! Storefront clients mint a random session id and send it as
//! `X-Session-Id` on every cart/checkout request. Carts and order history
//! are scoped to it; there is no account.

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

/// Maximum accepted session id length
const MAX_SESSION_ID_LEN: usize = 128;

/// The caller's browsing session id
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if value.is_empty() {
            return Err(AppError::validation("X-Session-Id header is required"));
        }
        if value.len() > MAX_SESSION_ID_LEN {
            return Err(AppError::validation("X-Session-Id is too long"));
        }
        Ok(SessionId(value.to_string()))
    }
}
