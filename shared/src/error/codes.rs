//! Unified error codes for the storefront platform
//!
//! This module defines all error codes used across the server, the admin
//! console, and the storefront frontend. Error codes are organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / permission errors
//! - 2xxx: Restaurant errors
//! - 3xxx: Menu / offer errors
//! - 4xxx: Cart errors
//! - 5xxx: Order / checkout errors
//! - 6xxx: Config errors
//! - 7xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token is invalid
    TokenInvalid = 1002,
    /// Permission denied
    PermissionDenied = 1003,
    /// Admin role required
    AdminRequired = 1004,

    // ==================== 2xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 2001,
    /// Restaurant name already exists
    RestaurantNameExists = 2002,
    /// Restaurant is suspended by the admin
    RestaurantSuspended = 2003,
    /// Restaurant is currently closed
    RestaurantClosed = 2004,

    // ==================== 3xxx: Menu / Offer ====================
    /// Menu item not found
    MenuItemNotFound = 3001,
    /// Menu item is marked unavailable
    MenuItemUnavailable = 3002,
    /// Offer not found
    OfferNotFound = 3003,
    /// Offer validity window is invalid
    OfferWindowInvalid = 3004,

    // ==================== 4xxx: Cart ====================
    /// Cart is empty
    CartEmpty = 4001,
    /// Item not present in the cart
    CartItemNotFound = 4002,
    /// Cart already belongs to a different restaurant
    RestaurantMismatch = 4003,
    /// Quantity outside the accepted range
    QuantityOutOfRange = 4004,

    // ==================== 5xxx: Order ====================
    /// Order not found
    OrderNotFound = 5001,
    /// Illegal order status transition
    OrderStatusInvalid = 5002,
    /// Checkout could not be completed
    CheckoutFailed = 5003,

    // ==================== 6xxx: Config ====================
    /// System config is invalid or incomplete
    ConfigInvalid = 6001,

    // ==================== 7xxx: Notification ====================
    /// Push provider rejected the request
    PushProviderError = 7001,
    /// No device tokens registered
    NoDeviceTokens = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Local storage error
    StorageError = 9003,
    /// Network error reaching an external backend
    NetworkError = 9004,
    /// Timeout reaching an external backend
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Authentication required",
            Self::TokenInvalid => "Invalid token",
            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin access required",

            Self::RestaurantNotFound => "Restaurant not found",
            Self::RestaurantNameExists => "Restaurant name already exists",
            Self::RestaurantSuspended => "Restaurant is suspended",
            Self::RestaurantClosed => "Restaurant is currently closed",

            Self::MenuItemNotFound => "Menu item not found",
            Self::MenuItemUnavailable => "Menu item is unavailable",
            Self::OfferNotFound => "Offer not found",
            Self::OfferWindowInvalid => "Offer validity window is invalid",

            Self::CartEmpty => "Cart is empty",
            Self::CartItemNotFound => "Item not in cart",
            Self::RestaurantMismatch => "Cart belongs to a different restaurant",
            Self::QuantityOutOfRange => "Quantity out of range",

            Self::OrderNotFound => "Order not found",
            Self::OrderStatusInvalid => "Illegal order status transition",
            Self::CheckoutFailed => "Checkout failed",

            Self::ConfigInvalid => "System config is invalid",

            Self::PushProviderError => "Push provider error",
            Self::NoDeviceTokens => "No device tokens registered",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::StorageError => "Storage error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Request timed out",
        }
    }

    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::TokenInvalid,
            1003 => Self::PermissionDenied,
            1004 => Self::AdminRequired,

            2001 => Self::RestaurantNotFound,
            2002 => Self::RestaurantNameExists,
            2003 => Self::RestaurantSuspended,
            2004 => Self::RestaurantClosed,

            3001 => Self::MenuItemNotFound,
            3002 => Self::MenuItemUnavailable,
            3003 => Self::OfferNotFound,
            3004 => Self::OfferWindowInvalid,

            4001 => Self::CartEmpty,
            4002 => Self::CartItemNotFound,
            4003 => Self::RestaurantMismatch,
            4004 => Self::QuantityOutOfRange,

            5001 => Self::OrderNotFound,
            5002 => Self::OrderStatusInvalid,
            5003 => Self::CheckoutFailed,

            6001 => Self::ConfigInvalid,

            7001 => Self::PushProviderError,
            7002 => Self::NoDeviceTokens,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::StorageError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::RestaurantMismatch,
            ErrorCode::OrderStatusInvalid,
            ErrorCode::TimeoutError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(ErrorCode::try_from(8999), Err(InvalidErrorCode(8999)));
    }
}
