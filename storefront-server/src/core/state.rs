//! Server state: one clone-cheap struct holding every service.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::{Notify, broadcast};

use crate::carts::CartService;
use crate::clock::TimeTicker;
use crate::core::config::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db;
use crate::services::{
    AvailabilityWatcher, FileConfigStore, PushService, SearchIndex, SheetsService,
    SystemConfigService, search,
};
use shared::time::TimeData;

/// Broadcast channel capacity; slow SSE consumers lag and skip, they do
/// not block writers.
const SYNC_CHANNEL_CAPACITY: usize = 256;

/// Resource version manager
///
/// Lock-free per-resource version counters over a DashMap. Used by sync
/// events so clients can tell stale payloads from fresh ones.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Bump and return the version for a resource (starts at 1)
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 if the resource was never bumped
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// One change notification on the server-sent event stream
#[derive(Debug, Clone, Serialize)]
pub struct SyncEvent {
    /// Resource kind: restaurant, menu_item, offer, orders, cart, ...
    pub resource: String,
    /// created | updated | deleted | opened | closed
    pub action: String,
    /// Record id (or session id for carts)
    pub id: String,
    /// Monotonic per-resource version
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Server state - holds shared references to every service
///
/// Cloning is shallow (Arcs all the way down), so handlers receive it by
/// value through axum's `State`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable)
    pub config: Config,
    /// Embedded document store
    pub db: Surreal<Db>,
    /// Session carts (redb-backed)
    pub carts: CartService,
    /// System config singleton service
    pub system_config: SystemConfigService,
    /// Spreadsheet backend facade
    pub sheets: SheetsService,
    /// Push notification delivery
    pub push: PushService,
    /// In-memory search index
    pub search: Arc<SearchIndex>,
    /// Shared time ticker
    pub ticker: Arc<TimeTicker>,
    /// Cached availability verdicts + transition broadcasting
    pub availability: Arc<AvailabilityWatcher>,
    /// Sync event fan-out (SSE)
    pub sync_tx: broadcast::Sender<SyncEvent>,
    /// Per-resource version counters
    pub resource_versions: Arc<ResourceVersions>,
    /// Signal for config-dependent background work
    pub config_notify: Arc<Notify>,
}

impl ServerState {
    /// Build every service from the configuration.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let work_dir = Path::new(&config.work_dir);
        std::fs::create_dir_all(work_dir)
            .with_context(|| format!("Failed to create work dir {}", work_dir.display()))?;

        let db = db::connect(work_dir)
            .await
            .context("Failed to open the document store")?;

        let (sync_tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        let resource_versions = Arc::new(ResourceVersions::new());

        let system_config = SystemConfigService::load(Arc::new(FileConfigStore::new(
            work_dir.join("system_config.json"),
        )))
        .context("Failed to load system config")?;

        let carts = CartService::open(
            &work_dir.join("carts.redb"),
            system_config.clone(),
            resource_versions.clone(),
            sync_tx.clone(),
        )
        .context("Failed to open the cart store")?;

        let sheets = SheetsService::new(config).context("Failed to build the sheets client")?;
        let push = PushService::new(config).context("Failed to build the push client")?;

        let ticker = Arc::new(TimeTicker::new(
            config.timezone,
            Duration::from_secs(config.tick_interval_secs.max(1)),
        ));

        let availability = Arc::new(AvailabilityWatcher::new(
            db.clone(),
            system_config.clone(),
            resource_versions.clone(),
            sync_tx.clone(),
        ));

        Ok(Self {
            config: config.clone(),
            db,
            carts,
            system_config,
            sheets,
            push,
            search: Arc::new(SearchIndex::new()),
            ticker,
            availability,
            sync_tx,
            resource_versions,
            config_notify: Arc::new(Notify::new()),
        })
    }

    /// Emit a sync event for a changed resource.
    pub fn broadcast_sync<T: Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let event = SyncEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: id.to_string(),
            version: self.resource_versions.increment(resource),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        // No receivers just means nobody is watching right now.
        let _ = self.sync_tx.send(event);
    }

    /// Register background work: the search warmup and the availability
    /// watcher riding the shared ticker.
    pub async fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        // Warm the search index so first queries don't pay the build.
        let warmup_state = self.clone();
        tasks.spawn("search_warmup", TaskKind::Warmup, async move {
            match search::build_corpus(&warmup_state.db).await {
                Ok(corpus) => {
                    let count = corpus.len();
                    warmup_state.search.init(corpus);
                    tracing::info!(entries = count, "Search index built");
                }
                Err(e) => {
                    tracing::error!("Search index warmup failed: {e}");
                }
            }
        });

        // Availability rides the shared ticker: one timer for the whole
        // process no matter how many consumers.
        let watcher = self.availability.clone();
        self.ticker
            .add_listener("availability_watch", move |time: TimeData| {
                let watcher = watcher.clone();
                tokio::spawn(async move {
                    watcher.refresh(time).await;
                });
            });
        self.ticker.init();

        // Re-check availability as soon as the admin changes the config
        // (global override flips should not wait for the next tick).
        let watcher = self.availability.clone();
        let notify = self.config_notify.clone();
        let tz = self.config.timezone;
        let shutdown = tasks.shutdown_token();
        tasks.spawn("config_watch", TaskKind::Worker, async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    _ = notify.notified() => {
                        watcher.refresh(TimeData::now_in(tz)).await;
                    }
                }
            }
        });
    }
}
