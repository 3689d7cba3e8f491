//! Shared types for the storefront platform
//!
//! Common types used across the server and client crates: domain models,
//! error types, response structures, and the pure time/availability/cart
//! logic that both sides agree on.

pub mod availability;
pub mod cart;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod time;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use availability::{Availability, ClosedReason, GlobalOverride, ManualOverride};
pub use cart::{Cart, CartError, CartItem, PricingConfig};
pub use time::TimeData;
