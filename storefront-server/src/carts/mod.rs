//! Session cart service
//!
//! Applies the cart mutations from `shared::cart` to the persisted session
//! cart: every mutating operation loads the cart, mutates it, persists the
//! whole value, and fires a `cart` sync event so badge counters and the
//! floating cart UI can react.

pub mod storage;

pub use storage::{CartStorage, StorageError, StorageResult};

use std::path::Path;
use std::sync::Arc;

use shared::cart::{Cart, CartItemInput};
use shared::error::AppResult;
use tokio::sync::broadcast;

use crate::core::state::{ResourceVersions, SyncEvent};
use crate::services::config::SystemConfigService;

const RESOURCE: &str = "cart";

#[derive(Clone)]
pub struct CartService {
    storage: CartStorage,
    system_config: SystemConfigService,
    versions: Arc<ResourceVersions>,
    sync_tx: broadcast::Sender<SyncEvent>,
}

impl CartService {
    pub fn open(
        path: &Path,
        system_config: SystemConfigService,
        versions: Arc<ResourceVersions>,
        sync_tx: broadcast::Sender<SyncEvent>,
    ) -> AppResult<Self> {
        let storage = CartStorage::open(path)?;
        Ok(Self {
            storage,
            system_config,
            versions,
            sync_tx,
        })
    }

    /// The session's cart, empty if it has none yet.
    pub fn get(&self, session_id: &str) -> AppResult<Cart> {
        Ok(self.storage.load(session_id)?.unwrap_or_default())
    }

    /// Add an item (or bump its quantity). Cross-restaurant adds surface
    /// the conflict to the caller; nothing is persisted in that case.
    pub fn add_item(
        &self,
        session_id: &str,
        input: CartItemInput,
        restaurant_id: &str,
        restaurant_name: &str,
    ) -> AppResult<Cart> {
        let mut cart = self.get(session_id)?;
        cart.add_item(
            input,
            restaurant_id,
            restaurant_name,
            &self.system_config.pricing(),
        )?;
        self.persist_and_notify(session_id, &cart)?;
        Ok(cart)
    }

    /// Set a line's quantity; zero or below removes it.
    pub fn update_quantity(
        &self,
        session_id: &str,
        item_name: &str,
        quantity: i64,
    ) -> AppResult<Cart> {
        let mut cart = self.get(session_id)?;
        cart.update_quantity(item_name, quantity, &self.system_config.pricing())?;
        self.persist_and_notify(session_id, &cart)?;
        Ok(cart)
    }

    pub fn remove_item(&self, session_id: &str, item_name: &str) -> AppResult<Cart> {
        let mut cart = self.get(session_id)?;
        cart.remove_item(item_name, &self.system_config.pricing())?;
        self.persist_and_notify(session_id, &cart)?;
        Ok(cart)
    }

    /// Empty the cart and reset the restaurant binding.
    pub fn clear(&self, session_id: &str) -> AppResult<Cart> {
        let mut cart = self.get(session_id)?;
        cart.clear();
        self.persist_and_notify(session_id, &cart)?;
        Ok(cart)
    }

    fn persist_and_notify(&self, session_id: &str, cart: &Cart) -> AppResult<()> {
        self.storage.save(session_id, cart)?;

        let event = SyncEvent {
            resource: RESOURCE.to_string(),
            action: "updated".to_string(),
            id: session_id.to_string(),
            version: self.versions.increment(RESOURCE),
            data: serde_json::to_value(cart).ok(),
        };
        // No subscribers is fine; the event stream is best-effort.
        let _ = self.sync_tx.send(event);
        Ok(())
    }
}
