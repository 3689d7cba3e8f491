//! Database models
//!
//! These mirror the API models in `shared::models` but keep record
//! references as [`surrealdb::RecordId`]. Conversion to the string-id API
//! shapes happens in `api::convert`.

pub mod device_token;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod restaurant;

pub use device_token::DeviceToken;
pub use menu_item::MenuItem;
pub use offer::Offer;
pub use order::Order;
pub use restaurant::Restaurant;
