//! Host-side contracts.
//!
//! The host owns the managed collection, decides which mode the adapter runs
//! in and which privileged calls it may make, and shows notifications to the
//! user. Everything here is injected so the sync logic never reaches for
//! global state.

mod error;
mod file;
mod memory;

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;

use crate::models::{CollectionItem, FieldDescriptor};

pub use error::HostError;
pub use file::FileCollection;
pub use memory::MemoryCollection;

/// Plugin-data keys written after a successful sync.
pub mod plugin_keys {
    pub const DATA_SOURCE_ID: &str = "dataSourceId";
    pub const SLUG_FIELD_ID: &str = "slugFieldId";
}

/// A managed collection owned by the host.
///
/// `add_items` upserts by item id. Ids passed to `remove_items` that are not
/// present are ignored.
#[async_trait]
pub trait ManagedCollection: Send + Sync {
    async fn get_item_ids(&self) -> Result<Vec<String>, HostError>;

    async fn get_fields(&self) -> Result<Vec<FieldDescriptor>, HostError>;

    async fn set_fields(&self, fields: &[FieldDescriptor]) -> Result<(), HostError>;

    async fn add_items(&self, items: &[CollectionItem]) -> Result<(), HostError>;

    async fn remove_items(&self, ids: &[String]) -> Result<(), HostError>;

    /// Stores a plugin-data value. `None` clears the key.
    async fn set_plugin_data(&self, key: &str, value: Option<&str>) -> Result<(), HostError>;

    async fn get_plugin_data(&self, key: &str) -> Result<Option<String>, HostError>;
}

/// Mode the host launched the adapter in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Canvas,
    ConfigureManagedCollection,
    SyncManagedCollection,
}

impl fmt::Display for HostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostMode::Canvas => write!(f, "canvas"),
            HostMode::ConfigureManagedCollection => write!(f, "configureManagedCollection"),
            HostMode::SyncManagedCollection => write!(f, "syncManagedCollection"),
        }
    }
}

/// Collection calls that require host permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectedMethod {
    SetFields,
    AddItems,
    RemoveItems,
    SetPluginData,
}

impl ProtectedMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectedMethod::SetFields => "ManagedCollection.setFields",
            ProtectedMethod::AddItems => "ManagedCollection.addItems",
            ProtectedMethod::RemoveItems => "ManagedCollection.removeItems",
            ProtectedMethod::SetPluginData => "ManagedCollection.setPluginData",
        }
    }

    pub fn all() -> [ProtectedMethod; 4] {
        [
            ProtectedMethod::SetFields,
            ProtectedMethod::AddItems,
            ProtectedMethod::RemoveItems,
            ProtectedMethod::SetPluginData,
        ]
    }
}

impl fmt::Display for ProtectedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Methods the collection synchronizer calls.
pub const SYNC_METHODS: [ProtectedMethod; 3] = [
    ProtectedMethod::RemoveItems,
    ProtectedMethod::AddItems,
    ProtectedMethod::SetPluginData,
];

/// Host mode and granted permissions for one invocation.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub mode: HostMode,
    allowed: HashSet<ProtectedMethod>,
}

impl HostContext {
    /// Creates a context with every protected method allowed.
    pub fn new(mode: HostMode) -> Self {
        Self {
            mode,
            allowed: ProtectedMethod::all().into_iter().collect(),
        }
    }

    /// Creates a context with no protected method allowed.
    pub fn read_only(mode: HostMode) -> Self {
        Self {
            mode,
            allowed: HashSet::new(),
        }
    }

    pub fn deny(mut self, method: ProtectedMethod) -> Self {
        self.allowed.remove(&method);
        self
    }

    /// Returns true only if every listed method is allowed.
    pub fn is_allowed_to(&self, methods: &[ProtectedMethod]) -> bool {
        methods.iter().all(|m| self.allowed.contains(m))
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Info => write!(f, "info"),
            Variant::Success => write!(f, "success"),
            Variant::Warning => write!(f, "warning"),
            Variant::Error => write!(f, "error"),
        }
    }
}

/// Shows toast-style messages to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, variant: Variant);
}
