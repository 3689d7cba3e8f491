//! Device Token Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::DeviceToken;
use shared::models::DeviceTokenRegister;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "device_token";

#[derive(Clone)]
pub struct DeviceTokenRepository {
    base: BaseRepository,
}

impl DeviceTokenRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<DeviceToken>> {
        let tokens: Vec<DeviceToken> = self
            .base
            .db()
            .query("SELECT * FROM device_token ORDER BY registered_at DESC")
            .await?
            .take(0)?;
        Ok(tokens)
    }

    pub async fn find_by_token(&self, token: &str) -> RepoResult<Option<DeviceToken>> {
        let token_owned = token.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM device_token WHERE token = $token LIMIT 1")
            .bind(("token", token_owned))
            .await?;
        let tokens: Vec<DeviceToken> = result.take(0)?;
        Ok(tokens.into_iter().next())
    }

    /// Register a device, re-registration refreshes the timestamp
    pub async fn upsert(&self, data: DeviceTokenRegister) -> RepoResult<DeviceToken> {
        if let Some(existing) = self.find_by_token(&data.token).await? {
            let token = existing.token.clone();
            self.base
                .db()
                .query("UPDATE device_token SET registered_at = $now WHERE token = $token")
                .bind(("now", now_millis()))
                .bind(("token", token))
                .await?;
            return Ok(existing);
        }

        let record = DeviceToken {
            id: None,
            token: data.token,
            platform: data.platform.unwrap_or_default(),
            registered_at: now_millis(),
        };

        let created: Option<DeviceToken> = self.base.db().create(TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to register device".to_string()))
    }

    /// Drop a registration (token rotated or invalidated)
    pub async fn delete_by_token(&self, token: &str) -> RepoResult<bool> {
        let existing = self.find_by_token(token).await?;
        let token_owned = token.to_string();
        self.base
            .db()
            .query("DELETE device_token WHERE token = $token")
            .bind(("token", token_owned))
            .await?;
        Ok(existing.is_some())
    }
}
