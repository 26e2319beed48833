//! Reconciliation of remote data sources into managed collections.
//!
//! ## Flow
//!
//! 1. A [`DataSourceReader`](crate::source::DataSourceReader) fetches a snapshot
//! 2. [`merge_fields_with_existing_fields`] keeps locally customized field names
//! 3. [`sync_collection`] removes stale items, writes the rest and stores the
//!    data source and slug field ids on the collection
//! 4. [`sync_existing_collection`] replays step 3 later from the stored ids

mod collection;
mod error;
mod fields;
mod resync;
mod setup;

pub use collection::{sync_collection, SyncSummary};
pub use error::{SyncError, ValidationError};
pub use fields::merge_fields_with_existing_fields;
pub use resync::{
    resync_from_metadata, sync_existing_collection, PersistedSyncMetadata, ResyncOutcome,
};
pub use setup::{configure_collection, FieldSelection};
