//! Core server plumbing: configuration, shared state, the HTTP server and
//! the background task registry.

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::Server;
pub use state::{ResourceVersions, ServerState, SyncEvent};
pub use tasks::{BackgroundTasks, TaskKind};
