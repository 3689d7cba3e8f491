//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_id, strip_table_prefix};
use crate::db::models::MenuItem;
use shared::models::{MenuItemCreate, MenuItemUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";
const RESTAURANT_TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All menu items across restaurants (admin listing, search corpus)
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// All items of one restaurant, menu ordering
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        let rid = record_id(RESTAURANT_TABLE, restaurant_id);
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant = $restaurant ORDER BY sort_order, name")
            .bind(("restaurant", rid))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Orderable items of one restaurant (storefront menu)
    pub async fn find_available_by_restaurant(
        &self,
        restaurant_id: &str,
    ) -> RepoResult<Vec<MenuItem>> {
        let rid = record_id(RESTAURANT_TABLE, restaurant_id);
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant = $restaurant AND is_available = true ORDER BY sort_order, name")
            .bind(("restaurant", rid))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<MenuItem> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item)
    }

    /// Find one item by name within a restaurant (cart add lookups)
    pub async fn find_by_name(
        &self,
        restaurant_id: &str,
        name: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let rid = record_id(RESTAURANT_TABLE, restaurant_id);
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant = $restaurant AND name = $name LIMIT 1")
            .bind(("restaurant", rid))
            .bind(("name", name_owned))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        // One name per restaurant; the cart matches lines by item name
        if self
            .find_by_name(&data.restaurant, &data.name)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists for this restaurant",
                data.name
            )));
        }

        let now = now_millis();
        let item = MenuItem {
            id: None,
            restaurant: record_id(RESTAURANT_TABLE, &data.restaurant),
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            is_veg: data.is_veg.unwrap_or(false),
            is_available: true,
            image: data.image,
            sort_order: data.sort_order.unwrap_or(0),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Merge-update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;

        let rid = record_id(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", rid.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<MenuItem> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<MenuItem> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted.is_some())
    }

    /// Delete every item of a restaurant (cascade on restaurant delete)
    pub async fn delete_by_restaurant(&self, restaurant_id: &str) -> RepoResult<()> {
        let rid = record_id(RESTAURANT_TABLE, restaurant_id);
        self.base
            .db()
            .query("DELETE menu_item WHERE restaurant = $restaurant")
            .bind(("restaurant", rid))
            .await?;
        Ok(())
    }
}
