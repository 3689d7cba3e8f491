//! Server-side services: system config, availability watching, search,
//! push delivery and the spreadsheet backend facade.

pub mod availability;
pub mod config;
pub mod push;
pub mod search;
pub mod sheets;

pub use availability::AvailabilityWatcher;
pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore, SystemConfigService};
pub use push::{PushPayload, PushReport, PushService};
pub use search::{SearchEntry, SearchIndex};
pub use sheets::SheetsService;
