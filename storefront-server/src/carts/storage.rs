//! redb-based cart storage
//!
//! One table, key = session id, value = JSON-serialized cart. Writes are
//! last-write-wins; two tabs on the same session are not reconciled.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::cart::Cart;
use shared::error::AppError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Carts table: key = session id, value = JSON-serialized Cart
const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Cart storage backed by redb
#[derive(Clone)]
pub struct CartStorage {
    db: Arc<Database>,
}

impl CartStorage {
    /// Open (creating if needed) the cart store at `path`.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Make sure the table exists so reads on a fresh store don't fail.
        let txn = db.begin_write()?;
        txn.open_table(CARTS_TABLE)?;
        txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Load the cart for a session, `None` if the session has none yet.
    pub fn load(&self, session_id: &str) -> StorageResult<Option<Cart>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CARTS_TABLE)?;
        let Some(guard) = table.get(session_id)? else {
            return Ok(None);
        };
        let cart: Cart = serde_json::from_slice(guard.value())?;
        Ok(Some(cart))
    }

    /// Persist the whole cart value for a session.
    pub fn save(&self, session_id: &str, cart: &Cart) -> StorageResult<()> {
        let bytes = serde_json::to_vec(cart)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.insert(session_id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Drop a session's cart entirely.
    pub fn remove(&self, session_id: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CARTS_TABLE)?;
            table.remove(session_id)?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::cart::{CartItemInput, PricingConfig};

    fn store() -> (tempfile::TempDir, CartStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::open(&dir.path().join("carts.redb")).unwrap();
        (dir, storage)
    }

    #[test]
    fn missing_session_loads_as_none() {
        let (_dir, storage) = store();
        assert!(storage.load("s1").unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, storage) = store();
        let mut cart = Cart::default();
        cart.add_item(
            CartItemInput {
                name: "Paneer Tikka".to_string(),
                price: 220.0,
            },
            "r1",
            "Spice Hub",
            &PricingConfig::default(),
        )
        .unwrap();

        storage.save("s1", &cart).unwrap();
        let loaded = storage.load("s1").unwrap().unwrap();
        assert_eq!(loaded, cart);

        // Other sessions are untouched.
        assert!(storage.load("s2").unwrap().is_none());
    }

    #[test]
    fn save_overwrites_last_write_wins() {
        let (_dir, storage) = store();
        let mut cart = Cart::default();
        let pricing = PricingConfig::default();
        cart.add_item(
            CartItemInput {
                name: "Paneer Tikka".to_string(),
                price: 220.0,
            },
            "r1",
            "Spice Hub",
            &pricing,
        )
        .unwrap();
        storage.save("s1", &cart).unwrap();

        cart.clear();
        storage.save("s1", &cart).unwrap();

        let loaded = storage.load("s1").unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn remove_deletes_the_session_cart() {
        let (_dir, storage) = store();
        storage.save("s1", &Cart::default()).unwrap();
        storage.remove("s1").unwrap();
        assert!(storage.load("s1").unwrap().is_none());
        // Removing again is a no-op.
        storage.remove("s1").unwrap();
    }
}
