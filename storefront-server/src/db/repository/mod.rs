//! Repository Module
//!
//! CRUD operations over the SurrealDB tables, one repository per resource.

pub mod device_token;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod restaurant;

// Re-exports
pub use device_token::DeviceTokenRepository;
pub use menu_item::MenuItemRepository;
pub use offer::OfferRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "table:id" strings at the API boundary, RecordId inside.
// =============================================================================
//
//   - parse: record_id("restaurant", "restaurant:abc") or ("restaurant", "abc")
//   - render: RecordId implements Display as "table:id"

/// Drop a leading `table:` prefix if present.
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((t, rest)) if t == table => rest,
        _ => id,
    }
}

/// Build a [`RecordId`] from either a bare key or a `table:id` string.
pub fn record_id(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, strip_table_prefix(table, id))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_the_matching_table_prefix() {
        assert_eq!(strip_table_prefix("restaurant", "restaurant:abc"), "abc");
        assert_eq!(strip_table_prefix("restaurant", "abc"), "abc");
        assert_eq!(strip_table_prefix("restaurant", "orders:abc"), "orders:abc");
    }
}
