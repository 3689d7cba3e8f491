//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult, record_id, strip_table_prefix};
use crate::db::models::Restaurant;
use shared::models::{AdminStatus, RestaurantCreate, RestaurantUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All restaurants, storefront ordering (priority first)
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant ORDER BY priority DESC, name")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// Active (not suspended) restaurants, storefront ordering
    pub async fn find_active(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE admin_status = 'active' ORDER BY priority DESC, name")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let restaurant: Option<Restaurant> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(restaurant)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Restaurant>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create a new restaurant
    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Restaurant '{}' already exists",
                data.name
            )));
        }

        let now = now_millis();
        let restaurant = Restaurant {
            id: None,
            name: data.name,
            description: data.description,
            cuisine: data.cuisine,
            address: data.address,
            phone: data.phone,
            image: data.image,
            opens_at: data.opens_at,
            closes_at: data.closes_at,
            is_open: None,
            admin_status: AdminStatus::Active,
            priority: data.priority.unwrap_or(0),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Restaurant> =
            self.base.db().create(TABLE).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Merge-update a restaurant
    pub async fn update(&self, id: &str, data: RestaurantUpdate) -> RepoResult<Restaurant> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Restaurant '{new_name}' already exists"
            )));
        }

        let rid = record_id(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", rid.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<Restaurant> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
    }

    /// Set or clear the manual open/closed override.
    ///
    /// `None` removes the field so the schedule takes over again.
    pub async fn set_override(&self, id: &str, is_open: Option<bool>) -> RepoResult<Restaurant> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))?;

        let rid = record_id(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $id SET is_open = $is_open, updated_at = $now")
            .bind(("id", rid))
            .bind(("is_open", is_open))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
    }

    /// Hard delete a restaurant
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Restaurant> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted.is_some())
    }
}
