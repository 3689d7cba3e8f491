//! Storefront Server - restaurant ordering backend
//!
//! # Architecture overview
//!
//! The server behind the customer storefront and the admin console:
//!
//! - **Catalog** (`db`): embedded SurrealDB storage for restaurants, menus,
//!   offers, orders and device tokens
//! - **Carts** (`carts`): redb-backed session carts with single-restaurant
//!   binding and derived totals
//! - **Availability** (`services::availability` + `clock`): shared time
//!   ticker driving open/closed evaluation for every restaurant
//! - **Legacy backend** (`services::sheets`): retry-wrapped gateway to the
//!   spreadsheet scripting backend
//! - **HTTP API** (`api`): storefront routes plus the token-guarded admin
//!   console routes
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── clock.rs       # shared time ticker
//! ├── db/            # document store + repositories
//! ├── carts/         # session cart storage and service
//! ├── services/      # availability, search, push, sheets, system config
//! ├── checkout.rs    # WhatsApp hand-off
//! ├── auth/          # admin guard
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod carts;
pub mod checkout;
pub mod clock;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::clock::TimeTicker;
pub use crate::core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging. Call once, before anything else.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
