//! Input validation helpers
//!
//! Centralized text length constants and validation functions applied at
//! the API boundary. Validation failures reject synchronously with a
//! descriptive message; nothing is retried.

use shared::error::{AppError, AppResult};
use shared::time::parse_hhmm;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, menu item, offer title, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, cuisine labels, categories
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Device tokens
pub const MAX_TOKEN_LEN: usize = 512;

/// Maximum price accepted at the boundary
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an `HH:MM` time-of-day string.
pub fn validate_hhmm(value: &str, field: &str) -> AppResult<()> {
    if parse_hhmm(value).is_none() {
        return Err(AppError::validation(format!(
            "{field} must be a valid HH:MM time, got '{value}'"
        )));
    }
    Ok(())
}

/// Validate a phone number: 7-15 digits after stripping separators.
pub fn validate_phone(value: &str, field: &str) -> AppResult<()> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let rest_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !(7..=15).contains(&digits) || !rest_ok {
        return Err(AppError::validation(format!(
            "{field} must be a valid phone number"
        )));
    }
    Ok(())
}

/// Validate a monetary amount: finite, non-negative, bounded.
pub fn validate_price(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 || value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} must be between 0 and {MAX_PRICE}"
        )));
    }
    Ok(())
}

/// Validate a percentage in [0, 100].
pub fn validate_percent(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("Spice Hub", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn hhmm_validation_follows_the_parser() {
        assert!(validate_hhmm("10:00", "opens_at").is_ok());
        assert!(validate_hhmm("24:00", "opens_at").is_err());
        assert!(validate_hhmm("soon", "opens_at").is_err());
    }

    #[test]
    fn phone_validation() {
        assert!(validate_phone("+91 98765 43210", "phone").is_ok());
        assert!(validate_phone("9876543210", "phone").is_ok());
        assert!(validate_phone("123", "phone").is_err());
        assert!(validate_phone("not-a-phone", "phone").is_err());
    }

    #[test]
    fn price_and_percent_bounds() {
        assert!(validate_price(220.0, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(f64::INFINITY, "price").is_err());
        assert!(validate_percent(15.0, "discount").is_ok());
        assert!(validate_percent(101.0, "discount").is_err());
    }
}
