use chrono_tz::Tz;
use shared::time::DEFAULT_TIMEZONE;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/storefront | Work directory (db, carts, config, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | STORE_TIMEZONE | Asia/Kolkata | Business timezone for schedules |
/// | ADMIN_TOKEN | (empty) | Bearer token for the admin console; empty disables the admin plane |
/// | SHEETS_ENDPOINT | http://localhost:8090/exec | Spreadsheet backend script URL |
/// | PUSH_ENDPOINT | http://localhost:8091/send | Push notification provider URL |
/// | PUSH_API_KEY | (none) | Bearer key for the push provider |
/// | TICK_INTERVAL_SECS | 60 | Shared time ticker cadence |
/// | ENVIRONMENT | development | development \| staging \| production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database, cart store, config and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone used for all schedule evaluation
    pub timezone: Tz,
    /// Admin console bearer token; empty means the admin plane is disabled
    pub admin_token: String,
    /// Spreadsheet backend endpoint
    pub sheets_endpoint: String,
    /// Push provider endpoint
    pub push_endpoint: String,
    /// Push provider API key
    pub push_api_key: Option<String>,
    /// Shared ticker cadence in seconds
    pub tick_interval_secs: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults. An unparseable timezone
    /// falls back to the default with a warning rather than failing boot.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("STORE_TIMEZONE")
                .ok()
                .map(|tz| parse_timezone(&tz))
                .unwrap_or(DEFAULT_TIMEZONE),
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or_default(),
            sheets_endpoint: std::env::var("SHEETS_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8090/exec".into()),
            push_endpoint: std::env::var("PUSH_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8091/send".into()),
            push_api_key: std::env::var("PUSH_API_KEY").ok(),
            tick_interval_secs: std::env::var("TICK_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work dir and port on top of the env config
    ///
    /// Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timezone(value: &str) -> Tz {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Unknown timezone '{value}', falling back to {}",
            DEFAULT_TIMEZONE
        );
        DEFAULT_TIMEZONE
    })
}
