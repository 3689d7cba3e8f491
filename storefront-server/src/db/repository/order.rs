//! Order Repository
//!
//! Orders are immutable snapshots; only `status` and `updated_at` move
//! after creation, and only through admin actions.

use super::{BaseRepository, RepoError, RepoResult, record_id, strip_table_prefix};
use crate::db::models::Order;
use serde::Deserialize;
use shared::models::OrderStatus;
use shared::request::PaginationQuery;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

/// How many orders a session can page back through
const SESSION_HISTORY_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order snapshot
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Order history of one browsing session, newest first
    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Vec<Order>> {
        let session = session_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE session_id = $session ORDER BY created_at DESC LIMIT $limit")
            .bind(("session", session))
            .bind(("limit", SESSION_HISTORY_LIMIT))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// One admin page, newest first, optionally filtered by status
    pub async fn find_page(
        &self,
        pagination: &PaginationQuery,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let limit = pagination.limit() as i64;
        let start = pagination.offset() as i64;

        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query("SELECT * FROM orders WHERE status = $status ORDER BY created_at DESC LIMIT $limit START $start")
                    .bind(("status", status))
                    .bind(("limit", limit))
                    .bind(("start", start))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM orders ORDER BY created_at DESC LIMIT $limit START $start")
                    .bind(("limit", limit))
                    .bind(("start", start))
                    .await?
            }
        };
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Total order count, optionally filtered by status
    pub async fn count(&self, status: Option<OrderStatus>) -> RepoResult<u64> {
        #[derive(Deserialize)]
        struct CountRow {
            count: u64,
        }

        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query("SELECT count() FROM orders WHERE status = $status GROUP ALL")
                    .bind(("status", status))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT count() FROM orders GROUP ALL")
                    .await?
            }
        };
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
    }

    /// Move an order to a new status.
    ///
    /// Transition legality is the handler's responsibility; the repository
    /// only writes.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);
        let rid = record_id(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $id SET status = $status, updated_at = $now")
            .bind(("id", rid))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }
}
