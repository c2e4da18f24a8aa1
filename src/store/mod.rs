//! In-memory item storage backend.
//!
//! Holds the canonical id → item map for the lifetime of the process.
//! All data is lost on restart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// The single resource type managed by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier. Minted by the store when empty at save time.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-assigned RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

/// In-memory keyed container of items.
///
/// Thread-safe via `RwLock`. Each operation takes the lock once, so every
/// save/get/list/remove is individually atomic against every other. There
/// are no cross-operation transactions: a `list` racing a `save` may or may
/// not include the new item, but never sees a half-written record.
pub struct ItemStore {
    items: RwLock<HashMap<String, Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        ItemStore {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Store an item, minting a UUID id if it arrives without one.
    /// Overwrites any existing item under the same id. Returns the stored
    /// item with its id populated.
    pub fn save(&self, mut item: Item) -> Item {
        if item.id.is_empty() {
            item.id = uuid::Uuid::new_v4().to_string();
        }
        self.items
            .write()
            .unwrap()
            .insert(item.id.clone(), item.clone());
        item
    }

    /// Get a single item by id. Absence is `None`, not an error.
    pub fn get(&self, id: &str) -> Option<Item> {
        self.items.read().unwrap().get(id).cloned()
    }

    /// Snapshot of all stored items, in unspecified order.
    pub fn list(&self) -> Vec<Item> {
        self.items.read().unwrap().values().cloned().collect()
    }

    /// Remove an item by id. No-op if absent.
    ///
    /// Not reachable from the HTTP surface; kept as a store primitive for
    /// embedding callers and tests.
    pub fn remove(&self, id: &str) {
        self.items.write().unwrap().remove(id);
    }

    /// Count of stored items.
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
