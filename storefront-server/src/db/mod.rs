//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) under the work directory. Records
//! are plain documents; repositories own all query strings.

pub mod models;
pub mod repository;

use std::path::Path;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

/// Open (creating if needed) the embedded database under `work_dir/data`.
pub async fn connect(work_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let path = work_dir.join("data");
    let db = Surreal::new::<RocksDb>(path.clone())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!("Embedded database ready at {}", path.display());
    Ok(db)
}
