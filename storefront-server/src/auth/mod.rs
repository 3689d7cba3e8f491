//! Admin guard
//!
//! Identity lives with an external provider; the server only checks a
//! configured bearer token for the admin plane. The guard fails closed:
//! with no token configured every admin request is rejected, and a failed
//! check produces no partial effects because it runs before any handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use crate::core::ServerState;

/// Marker extension proving the admin guard ran
#[derive(Debug, Clone, Copy)]
pub struct CurrentAdmin;

/// Middleware for every `/api/admin/*` route.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let configured = state.config.admin_token.as_str();
    if configured.is_empty() {
        // Fail closed rather than open when the operator never set a token.
        return Err(AppError::with_message(
            ErrorCode::AdminRequired,
            "Admin access is not configured",
        ));
    }

    let provided = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    if provided.is_empty() {
        return Err(AppError::not_authenticated());
    }

    if !constant_time_eq(provided.as_bytes(), configured.as_bytes()) {
        return Err(AppError::new(ErrorCode::TokenInvalid));
    }

    request.extensions_mut().insert(CurrentAdmin);
    Ok(next.run(request).await)
}

/// Length-safe comparison that does not bail on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_exact_bytes_only() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secret2"));
        assert!(!constant_time_eq(b"secret", b"Secret"));
        assert!(!constant_time_eq(b"", b"secret"));
        assert!(constant_time_eq(b"", b""));
    }
}
