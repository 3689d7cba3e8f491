//! Availability watcher
//!
//! Subscribes to the shared time ticker, re-evaluates every restaurant's
//! open/closed verdict on each tick, and broadcasts a sync event whenever a
//! verdict flips so storefront clients can update without polling.
//!
//! The cached verdicts are a convenience snapshot; request handlers that
//! need to-the-minute truth evaluate live against the same pure logic.

use dashmap::DashMap;
use serde_json::json;
use shared::availability::Availability;
use shared::time::TimeData;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use crate::api::convert;
use crate::core::state::{ResourceVersions, SyncEvent};
use crate::db::repository::RestaurantRepository;
use crate::services::config::SystemConfigService;
use std::sync::Arc;

const RESOURCE: &str = "availability";

pub struct AvailabilityWatcher {
    db: Surreal<Db>,
    system_config: SystemConfigService,
    versions: Arc<ResourceVersions>,
    sync_tx: broadcast::Sender<SyncEvent>,
    verdicts: DashMap<String, Availability>,
}

impl AvailabilityWatcher {
    pub fn new(
        db: Surreal<Db>,
        system_config: SystemConfigService,
        versions: Arc<ResourceVersions>,
        sync_tx: broadcast::Sender<SyncEvent>,
    ) -> Self {
        Self {
            db,
            system_config,
            versions,
            sync_tx,
            verdicts: DashMap::new(),
        }
    }

    /// Last computed verdict for a restaurant, if any tick has seen it.
    pub fn get(&self, restaurant_id: &str) -> Option<Availability> {
        self.verdicts.get(restaurant_id).map(|v| *v)
    }

    /// Re-evaluate everything at the given time and broadcast transitions.
    pub async fn refresh(&self, time: TimeData) {
        let restaurants = match RestaurantRepository::new(self.db.clone()).find_all().await {
            Ok(restaurants) => restaurants,
            Err(e) => {
                tracing::error!("Availability refresh failed to load restaurants: {e}");
                return;
            }
        };

        let global = self.system_config.global_override();
        let mut seen = Vec::with_capacity(restaurants.len());

        for restaurant in restaurants {
            let restaurant = convert::restaurant(restaurant);
            let Some(id) = restaurant.id.clone() else {
                continue;
            };
            let verdict = restaurant.availability(global, &time);
            seen.push(id.clone());

            let previous = self.verdicts.insert(id.clone(), verdict);
            if previous.is_some_and(|p| p == verdict) {
                continue;
            }

            let action = if verdict.open { "opened" } else { "closed" };
            // Only announce actual flips; the very first evaluation seeds
            // the cache silently.
            if previous.is_some() {
                tracing::info!(restaurant = %restaurant.name, action, "Availability changed");
                let event = SyncEvent {
                    resource: RESOURCE.to_string(),
                    action: action.to_string(),
                    id: id.clone(),
                    version: self.versions.increment(RESOURCE),
                    data: Some(json!({
                        "restaurant_id": id,
                        "availability": verdict,
                    })),
                };
                let _ = self.sync_tx.send(event);
            }
        }

        // Forget restaurants that no longer exist.
        self.verdicts.retain(|id, _| seen.contains(id));
    }
}
