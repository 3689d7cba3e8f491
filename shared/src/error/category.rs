//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the thousands digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication / permission errors
/// - 2xxx: Restaurant errors
/// - 3xxx: Menu / offer errors
/// - 4xxx: Cart errors
/// - 5xxx: Order errors
/// - 6xxx: Config errors
/// - 7xxx: Notification errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication / permission errors (1xxx)
    Auth,
    /// Restaurant errors (2xxx)
    Restaurant,
    /// Menu / offer errors (3xxx)
    Menu,
    /// Cart errors (4xxx)
    Cart,
    /// Order errors (5xxx)
    Order,
    /// Config errors (6xxx)
    Config,
    /// Notification errors (7xxx)
    Notification,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Restaurant,
            3000..4000 => Self::Menu,
            4000..5000 => Self::Cart,
            5000..6000 => Self::Order,
            6000..7000 => Self::Config,
            7000..8000 => Self::Notification,
            _ => Self::System,
        }
    }
}

impl From<ErrorCode> for ErrorCategory {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_by_range() {
        assert_eq!(
            ErrorCategory::from(ErrorCode::ValidationFailed),
            ErrorCategory::General
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::RestaurantClosed),
            ErrorCategory::Restaurant
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::RestaurantMismatch),
            ErrorCategory::Cart
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::DatabaseError),
            ErrorCategory::System
        );
    }
}
