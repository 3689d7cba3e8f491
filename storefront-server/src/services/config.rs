//! System config service
//!
//! The singleton [`SystemConfig`] (WhatsApp order number, global override,
//! pricing) lives behind an injected [`ConfigStore`] so handlers and tests
//! never touch the filesystem directly. The file-backed store is used in
//! production; tests substitute the in-memory one.
//!
//! Defaults-on-missing: the first load writes the default config back so
//! the admin console always has a record to edit.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use shared::cart::PricingConfig;
use shared::availability::GlobalOverride;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{SystemConfig, SystemConfigUpdate};

/// Read/write dependency for the config singleton
pub trait ConfigStore: Send + Sync {
    /// `Ok(None)` means "nothing persisted yet"
    fn load(&self) -> AppResult<Option<SystemConfig>>;
    fn save(&self, config: &SystemConfig) -> AppResult<()>;
}

/// JSON file under the work directory
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> AppResult<Option<SystemConfig>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read system config: {e}"
                )));
            }
        };
        let config = serde_json::from_str(&raw).map_err(|e| {
            AppError::with_message(
                ErrorCode::ConfigInvalid,
                format!("Malformed system config at {}: {e}", self.path.display()),
            )
        })?;
        Ok(Some(config))
    }

    fn save(&self, config: &SystemConfig) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::storage(format!("Failed to create config dir: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(config)
            .map_err(|e| AppError::internal(format!("Failed to serialize config: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::storage(format!("Failed to write system config: {e}")))?;
        Ok(())
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryConfigStore {
    inner: Mutex<Option<SystemConfig>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> AppResult<Option<SystemConfig>> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, config: &SystemConfig) -> AppResult<()> {
        *self.inner.lock() = Some(config.clone());
        Ok(())
    }
}

/// Cached view over a [`ConfigStore`]
///
/// Reads are lock-cheap clones of the cache; updates write through the
/// store first, then swap the cache.
#[derive(Clone)]
pub struct SystemConfigService {
    store: Arc<dyn ConfigStore>,
    cached: Arc<RwLock<SystemConfig>>,
}

impl SystemConfigService {
    /// Load the singleton, creating it with defaults on first read.
    pub fn load(store: Arc<dyn ConfigStore>) -> AppResult<Self> {
        let config = match store.load()? {
            Some(config) => config,
            None => {
                let config = SystemConfig::default();
                store.save(&config)?;
                tracing::info!("System config created with defaults");
                config
            }
        };
        Ok(Self {
            store,
            cached: Arc::new(RwLock::new(config)),
        })
    }

    /// Snapshot of the current config
    pub fn current(&self) -> SystemConfig {
        self.cached.read().clone()
    }

    pub fn pricing(&self) -> PricingConfig {
        self.cached.read().pricing
    }

    pub fn global_override(&self) -> GlobalOverride {
        self.cached.read().global_override
    }

    /// Apply a partial update, persisting before the cache swap.
    pub fn update(&self, update: SystemConfigUpdate) -> AppResult<SystemConfig> {
        let mut next = self.current();
        next.apply(update);
        self.store.save(&next)?;
        *self.cached.write() = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults_back() {
        let store = Arc::new(MemoryConfigStore::default());
        let service = SystemConfigService::load(store.clone()).unwrap();

        assert_eq!(service.current().global_override, GlobalOverride::Auto);
        // The store now holds the defaults.
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn updates_persist_and_refresh_the_cache() {
        let store = Arc::new(MemoryConfigStore::default());
        let service = SystemConfigService::load(store.clone()).unwrap();

        service
            .update(SystemConfigUpdate {
                whatsapp_order_number: Some("+91 98765 43210".to_string()),
                global_override: Some(GlobalOverride::Closed),
                tax_rate_percent: Some(12.0),
                ..SystemConfigUpdate::default()
            })
            .unwrap();

        assert_eq!(service.global_override(), GlobalOverride::Closed);
        assert_eq!(service.pricing().tax_rate_percent, 12.0);
        assert_eq!(
            store.load().unwrap().unwrap().whatsapp_order_number,
            "+91 98765 43210"
        );
    }

    #[test]
    fn partial_updates_leave_other_fields_alone() {
        let store = Arc::new(MemoryConfigStore::default());
        let service = SystemConfigService::load(store).unwrap();
        let before = service.current();

        service
            .update(SystemConfigUpdate {
                delivery_fee: Some(25.0),
                ..SystemConfigUpdate::default()
            })
            .unwrap();

        let after = service.current();
        assert_eq!(after.pricing.delivery_fee, 25.0);
        assert_eq!(after.pricing.tax_rate_percent, before.pricing.tax_rate_percent);
        assert_eq!(after.whatsapp_order_number, before.whatsapp_order_number);
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_config.json");

        let service =
            SystemConfigService::load(Arc::new(FileConfigStore::new(path.clone()))).unwrap();
        service
            .update(SystemConfigUpdate {
                whatsapp_order_number: Some("919876543210".to_string()),
                ..SystemConfigUpdate::default()
            })
            .unwrap();

        // A fresh service over the same file sees the persisted value.
        let reloaded =
            SystemConfigService::load(Arc::new(FileConfigStore::new(path))).unwrap();
        assert_eq!(reloaded.current().whatsapp_order_number, "919876543210");
    }

    #[test]
    fn malformed_file_is_an_error_not_a_silent_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_config.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = SystemConfigService::load(Arc::new(FileConfigStore::new(path)));
        assert!(result.is_err());
    }
}
