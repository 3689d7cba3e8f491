//! Offer Repository

use super::{BaseRepository, RepoError, RepoResult, record_id, strip_table_prefix};
use crate::db::models::Offer;
use shared::models::{OfferCreate, OfferUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "offer";
const RESTAURANT_TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All offers, newest first (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query("SELECT * FROM offer ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Offers currently inside their validity window (storefront)
    pub async fn find_valid(&self, now: i64) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query("SELECT * FROM offer WHERE is_active = true AND valid_from <= $now AND $now < valid_until ORDER BY discount_percent DESC")
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(offers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Offer>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let offer: Option<Offer> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(offer)
    }

    /// Create a new offer
    pub async fn create(&self, data: OfferCreate) -> RepoResult<Offer> {
        if data.valid_until <= data.valid_from {
            return Err(RepoError::Validation(
                "Offer must end after it starts".to_string(),
            ));
        }

        let now = now_millis();
        let offer = Offer {
            id: None,
            title: data.title,
            description: data.description,
            restaurant: data
                .restaurant
                .map(|rid| record_id(RESTAURANT_TABLE, &rid)),
            discount_percent: data.discount_percent,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Offer> = self.base.db().create(TABLE).content(offer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Merge-update an offer
    pub async fn update(&self, id: &str, mut data: OfferUpdate) -> RepoResult<Offer> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))?;

        // The merged window must still be well-formed
        let from = data.valid_from.unwrap_or(existing.valid_from);
        let until = data.valid_until.unwrap_or(existing.valid_until);
        if until <= from {
            return Err(RepoError::Validation(
                "Offer must end after it starts".to_string(),
            ));
        }

        let rid = record_id(TABLE, pure_id);

        // The restaurant reference is stored as a RecordId; set it apart
        // from the plain-field merge.
        if let Some(restaurant) = data.restaurant.take() {
            self.base
                .db()
                .query("UPDATE $id SET restaurant = $restaurant")
                .bind(("id", rid.clone()))
                .bind(("restaurant", record_id(RESTAURANT_TABLE, &restaurant)))
                .await?;
        }

        self.base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", rid.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<Offer> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))
    }

    /// Hard delete an offer
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Offer> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted.is_some())
    }
}
