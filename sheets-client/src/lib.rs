//! Client for the legacy spreadsheet backend
//!
//! The admin console's dashboard, analytics, invoice and notification-log
//! features are served by a spreadsheet scripting backend exposing a single
//! POST endpoint that accepts `{action, ...payload}` and answers
//! `{success, ...}` or `{success: false, error}`.
//!
//! This crate is the sole gateway to that endpoint. Every call goes through
//! a retry loop with exponential backoff and a per-attempt hard timeout,
//! and resolves to a [`CallOutcome`] instead of raising: the backend being
//! down must degrade features, never crash callers.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() {
//! use sheets_client::{SheetsClient, SheetsConfig};
//!
//! let client = SheetsClient::new(SheetsConfig::new(
//!     "https://script.example.com/macros/s/XXX/exec",
//! ))
//! .unwrap();
//!
//! let outcome = client.get_dashboard_data().await;
//! if outcome.success {
//!     println!("{:?}", outcome.data);
//! }
//! # }
//! ```

mod client;
mod config;
mod connectivity;
mod error;
mod retry;
mod types;

pub use client::SheetsClient;
pub use config::SheetsConfig;
pub use connectivity::{is_online, wait_for_online};
pub use error::{ClientError, ClientResult};
pub use retry::{RetryPolicy, with_retry};
pub use types::{Action, CallOutcome, NotificationLog};
