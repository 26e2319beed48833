//! In-memory managed collection.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{HostError, ManagedCollection};
use crate::models::{CollectionItem, FieldDescriptor};

/// Contents of a managed collection.
///
/// Items keep insertion order; re-adding an existing id replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CollectionState {
    pub fields: Vec<FieldDescriptor>,
    pub items: Vec<CollectionItem>,
    pub plugin_data: BTreeMap<String, String>,
}

impl CollectionState {
    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn upsert(&mut self, items: &[CollectionItem]) {
        for item in items {
            match self.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => self.items.push(item.clone()),
            }
        }
    }

    pub fn remove(&mut self, ids: &[String]) {
        self.items.retain(|item| !ids.contains(&item.id));
    }

    pub fn set_plugin_data(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.plugin_data.insert(key.to_string(), value.to_string());
            }
            None => {
                self.plugin_data.remove(key);
            }
        }
    }
}

/// A managed collection held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    state: Mutex<CollectionState>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection pre-populated with items.
    pub fn with_items(items: Vec<CollectionItem>) -> Self {
        Self {
            state: Mutex::new(CollectionState {
                items,
                ..Default::default()
            }),
        }
    }

    /// Returns a snapshot of all items.
    pub async fn get_items(&self) -> Vec<CollectionItem> {
        self.state.lock().await.items.clone()
    }

    pub async fn item(&self, id: &str) -> Option<CollectionItem> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }
}

#[async_trait]
impl ManagedCollection for MemoryCollection {
    async fn get_item_ids(&self) -> Result<Vec<String>, HostError> {
        Ok(self.state.lock().await.item_ids())
    }

    async fn get_fields(&self) -> Result<Vec<FieldDescriptor>, HostError> {
        Ok(self.state.lock().await.fields.clone())
    }

    async fn set_fields(&self, fields: &[FieldDescriptor]) -> Result<(), HostError> {
        self.state.lock().await.fields = fields.to_vec();
        Ok(())
    }

    async fn add_items(&self, items: &[CollectionItem]) -> Result<(), HostError> {
        self.state.lock().await.upsert(items);
        Ok(())
    }

    async fn remove_items(&self, ids: &[String]) -> Result<(), HostError> {
        self.state.lock().await.remove(ids);
        Ok(())
    }

    async fn set_plugin_data(&self, key: &str, value: Option<&str>) -> Result<(), HostError> {
        self.state.lock().await.set_plugin_data(key, value);
        Ok(())
    }

    async fn get_plugin_data(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.state.lock().await.plugin_data.get(key).cloned())
    }
}
