//! articlesync core library
//!
//! Fetches articles from a remote API and keeps a managed collection in sync
//! with them.

pub mod host;
pub mod models;
pub mod source;
pub mod sync;

pub use host::{
    FileCollection, HostContext, HostError, HostMode, ManagedCollection, MemoryCollection,
    Notifier, ProtectedMethod, Variant,
};
pub use models::{CollectionItem, DataSource, FieldData, FieldDescriptor, FieldType, FieldValue};
pub use source::{ArticlesClient, CancelSignal, DataSourceReader, DEFAULT_ARTICLES_URL};
pub use sync::{
    configure_collection, merge_fields_with_existing_fields, resync_from_metadata,
    sync_collection, sync_existing_collection, FieldSelection, PersistedSyncMetadata,
    ResyncOutcome, SyncError, SyncSummary, ValidationError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
