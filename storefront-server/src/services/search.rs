//! In-memory search index
//!
//! A flat index over menu item names, restaurant names and categories,
//! built once from the catalog and queried synchronously. It is rebuilt
//! only on explicit init/refresh calls; staleness between an admin edit
//! and the next refresh is an accepted trade-off at this data volume
//! (tens to low hundreds of entries).
//!
//! Result ordering is fixed, not incidental: prefix matches first, then
//! shorter names, then higher restaurant priority, then alphabetical.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{MenuItemRepository, RepoResult, RestaurantRepository};
use shared::models::AdminStatus;

/// Cap on returned matches
const MAX_RESULTS: usize = 25;

/// What a search entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Restaurant,
    MenuItem,
}

/// One searchable entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    pub kind: EntryKind,
    /// Matched and displayed name (item or restaurant name)
    pub name: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    /// Menu category; restaurants match on cuisine here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Restaurant priority, used as the static tie-break
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// The index itself. Cheap to read concurrently; rebuilds swap the whole
/// entry list under the write lock.
pub struct SearchIndex {
    entries: RwLock<Vec<SearchEntry>>,
    built: AtomicBool,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            built: AtomicBool::new(false),
        }
    }

    pub fn is_built(&self) -> bool {
        self.built.load(Ordering::Acquire)
    }

    /// Build the index once. Later calls are no-ops; use [`refresh`] to
    /// rebuild after catalog changes.
    ///
    /// [`refresh`]: SearchIndex::refresh
    pub fn init(&self, corpus: Vec<SearchEntry>) {
        if self.built.swap(true, Ordering::AcqRel) {
            return;
        }
        *self.entries.write() = corpus;
    }

    /// Unconditional rebuild from a fresh corpus.
    pub fn refresh(&self, corpus: Vec<SearchEntry>) {
        *self.entries.write() = corpus;
        self.built.store(true, Ordering::Release);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Case-insensitive substring search over names, restaurant names and
    /// categories. Empty queries match nothing.
    pub fn search(&self, query: &str) -> Vec<SearchEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let entries = self.entries.read();
        let mut hits: Vec<&SearchEntry> = entries
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry.restaurant_name.to_lowercase().contains(&needle)
                    || entry
                        .category
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect();

        hits.sort_by(|a, b| {
            let a_prefix = a.name.to_lowercase().starts_with(&needle);
            let b_prefix = b.name.to_lowercase().starts_with(&needle);
            b_prefix
                .cmp(&a_prefix)
                .then(a.name.len().cmp(&b.name.len()))
                .then(b.priority.cmp(&a.priority))
                .then(a.name.cmp(&b.name))
        });

        hits.into_iter().take(MAX_RESULTS).cloned().collect()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the corpus from the catalog: one entry per active restaurant,
/// one per available menu item of an active restaurant.
pub async fn build_corpus(db: &Surreal<Db>) -> RepoResult<Vec<SearchEntry>> {
    let restaurants = RestaurantRepository::new(db.clone()).find_active().await?;
    let items = MenuItemRepository::new(db.clone()).find_all().await?;

    let mut corpus = Vec::with_capacity(restaurants.len() + items.len());
    for restaurant in &restaurants {
        let Some(id) = restaurant.id.as_ref() else {
            continue;
        };
        corpus.push(SearchEntry {
            kind: EntryKind::Restaurant,
            name: restaurant.name.clone(),
            restaurant_id: id.to_string(),
            restaurant_name: restaurant.name.clone(),
            category: restaurant.cuisine.clone(),
            priority: restaurant.priority,
            price: None,
        });
    }

    for item in items {
        if !item.is_available {
            continue;
        }
        // Items of suspended restaurants stay out of the storefront.
        let Some(owner) = restaurants
            .iter()
            .find(|r| r.id.as_ref() == Some(&item.restaurant))
        else {
            continue;
        };
        if owner.admin_status != AdminStatus::Active {
            continue;
        }
        corpus.push(SearchEntry {
            kind: EntryKind::MenuItem,
            name: item.name,
            restaurant_id: item.restaurant.to_string(),
            restaurant_name: owner.name.clone(),
            category: Some(item.category),
            priority: owner.priority,
            price: Some(item.price),
        });
    }

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EntryKind, name: &str, restaurant: &str, category: Option<&str>, priority: i32) -> SearchEntry {
        SearchEntry {
            kind,
            name: name.to_string(),
            restaurant_id: format!("restaurant:{}", restaurant.to_lowercase()),
            restaurant_name: restaurant.to_string(),
            category: category.map(str::to_string),
            priority,
            price: None,
        }
    }

    fn index() -> SearchIndex {
        let idx = SearchIndex::new();
        idx.init(vec![
            entry(EntryKind::Restaurant, "Spice Hub", "Spice Hub", Some("North Indian"), 10),
            entry(EntryKind::MenuItem, "Paneer Tikka", "Spice Hub", Some("Starters"), 10),
            entry(EntryKind::MenuItem, "Paneer Butter Masala", "Spice Hub", Some("Mains"), 10),
            entry(EntryKind::MenuItem, "Chilli Paneer", "Dragon Bowl", Some("Starters"), 5),
            entry(EntryKind::MenuItem, "Veg Manchurian", "Dragon Bowl", Some("Starters"), 5),
        ]);
        idx
    }

    #[test]
    fn init_is_idempotent_but_refresh_rebuilds() {
        let idx = index();
        assert_eq!(idx.len(), 5);

        idx.init(vec![]);
        assert_eq!(idx.len(), 5, "second init must be a no-op");

        idx.refresh(vec![]);
        assert!(idx.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let idx = index();
        let hits = idx.search("paneer");
        assert_eq!(hits.len(), 3);

        let hits = idx.search("PANEER");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn prefix_matches_rank_before_substring_matches() {
        let idx = index();
        let hits = idx.search("paneer");
        // "Paneer Tikka" (prefix, shorter) before "Paneer Butter Masala"
        // (prefix, longer) before "Chilli Paneer" (substring only).
        assert_eq!(hits[0].name, "Paneer Tikka");
        assert_eq!(hits[1].name, "Paneer Butter Masala");
        assert_eq!(hits[2].name, "Chilli Paneer");
    }

    #[test]
    fn matches_restaurant_names_and_categories() {
        let idx = index();
        // Restaurant-name match pulls in that restaurant's entries.
        let hits = idx.search("dragon");
        assert_eq!(hits.len(), 2);

        // Category match.
        let hits = idx.search("starters");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn shorter_name_wins_within_the_same_prefix_class() {
        let idx = SearchIndex::new();
        idx.init(vec![
            entry(EntryKind::MenuItem, "Dosa Special", "A", None, 0),
            entry(EntryKind::MenuItem, "Dosa", "B", None, 0),
        ]);
        let hits = idx.search("dosa");
        assert_eq!(hits[0].name, "Dosa");
    }

    #[test]
    fn priority_breaks_remaining_ties() {
        let idx = SearchIndex::new();
        idx.init(vec![
            entry(EntryKind::MenuItem, "Chai", "Low Priority", None, 1),
            entry(EntryKind::MenuItem, "Chai", "High Priority", None, 9),
        ]);
        let hits = idx.search("chai");
        assert_eq!(hits[0].restaurant_name, "High Priority");
    }

    #[test]
    fn empty_and_whitespace_queries_match_nothing() {
        let idx = index();
        assert!(idx.search("").is_empty());
        assert!(idx.search("   ").is_empty());
    }
}
