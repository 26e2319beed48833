//! Managed collection persisted as a JSON document on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::memory::CollectionState;
use super::{HostError, ManagedCollection};
use crate::models::{CollectionItem, FieldDescriptor};

/// A managed collection stored in a single JSON file.
///
/// Every call reads the file, applies the change and writes it back through
/// a temporary file and a rename, so one call is all-or-nothing on disk.
///
/// File I/O is blocking `std::fs` and runs on the calling task. Collections
/// are small and accessed by one command at a time; wrap calls in
/// `tokio::task::spawn_blocking` before sharing one across a busy runtime.
#[derive(Debug, Clone)]
pub struct FileCollection {
    path: PathBuf,
}

impl FileCollection {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns all items in collection order.
    pub fn get_items(&self) -> Result<Vec<CollectionItem>, HostError> {
        Ok(self.load()?.items)
    }

    /// Loads the collection. A missing file is an empty collection.
    fn load(&self) -> Result<CollectionState, HostError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| HostError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CollectionState::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, state: &CollectionState) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| HostError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let bytes = serde_json::to_vec_pretty(state).map_err(|e| HostError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| HostError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(
            "Saved collection {} ({} items)",
            self.path.display(),
            state.items.len()
        );
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut CollectionState)) -> Result<(), HostError> {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)
    }

    fn io_error(&self, e: io::Error) -> HostError {
        HostError::Io {
            path: self.path.clone(),
            source: e,
        }
    }
}

#[async_trait]
impl ManagedCollection for FileCollection {
    async fn get_item_ids(&self) -> Result<Vec<String>, HostError> {
        Ok(self.load()?.item_ids())
    }

    async fn get_fields(&self) -> Result<Vec<FieldDescriptor>, HostError> {
        Ok(self.load()?.fields)
    }

    async fn set_fields(&self, fields: &[FieldDescriptor]) -> Result<(), HostError> {
        self.update(|state| state.fields = fields.to_vec())
    }

    async fn add_items(&self, items: &[CollectionItem]) -> Result<(), HostError> {
        self.update(|state| state.upsert(items))
    }

    async fn remove_items(&self, ids: &[String]) -> Result<(), HostError> {
        if ids.is_empty() {
            return Ok(());
        }
        self.update(|state| state.remove(ids))
    }

    async fn set_plugin_data(&self, key: &str, value: Option<&str>) -> Result<(), HostError> {
        self.update(|state| state.set_plugin_data(key, value))
    }

    async fn get_plugin_data(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.load()?.plugin_data.get(key).cloned())
    }
}
