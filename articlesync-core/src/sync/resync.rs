//! Unattended resync of a previously configured collection.

use super::collection::sync_collection;
use super::error::SyncError;
use crate::host::{
    plugin_keys, HostContext, HostError, HostMode, ManagedCollection, Notifier, Variant,
    SYNC_METHODS,
};
use crate::source::{CancelSignal, DataSourceReader};

/// Result of a resync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResyncOutcome {
    pub did_sync: bool,
}

impl ResyncOutcome {
    const SKIPPED: ResyncOutcome = ResyncOutcome { did_sync: false };
    const SYNCED: ResyncOutcome = ResyncOutcome { did_sync: true };
}

/// Sync metadata stored on a collection by the last successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSyncMetadata {
    pub data_source_id: Option<String>,
    pub slug_field_id: Option<String>,
}

impl PersistedSyncMetadata {
    /// Reads both plugin-data keys from the collection.
    pub async fn load<C>(collection: &C) -> Result<Self, HostError>
    where
        C: ManagedCollection + ?Sized,
    {
        Ok(Self {
            data_source_id: collection
                .get_plugin_data(plugin_keys::DATA_SOURCE_ID)
                .await?,
            slug_field_id: collection
                .get_plugin_data(plugin_keys::SLUG_FIELD_ID)
                .await?,
        })
    }
}

/// Re-runs the last sync without user interaction.
///
/// Does nothing unless there is a previous data source and slug field, the
/// host is in sync mode and every sync method is permitted. Empty ids count
/// as absent. The slug field is looked up by id in the freshly fetched
/// schema; if it is gone the user is told and nothing is written. Fetch and
/// sync failures, cancellation included, are logged, reported to the user,
/// and turned into `did_sync: false`.
pub async fn sync_existing_collection<C, R>(
    collection: &C,
    reader: &R,
    host: &HostContext,
    notifier: &dyn Notifier,
    previous_data_source_id: Option<&str>,
    previous_slug_field_id: Option<&str>,
    cancel: Option<&CancelSignal>,
) -> ResyncOutcome
where
    C: ManagedCollection + ?Sized,
    R: DataSourceReader + ?Sized,
{
    let Some(data_source_id) = previous_data_source_id.filter(|id| !id.is_empty()) else {
        return ResyncOutcome::SKIPPED;
    };

    let slug_field_id = match previous_slug_field_id.filter(|id| !id.is_empty()) {
        Some(id) if host.mode == HostMode::SyncManagedCollection => id,
        _ => {
            tracing::debug!(
                "Not resyncing '{}' in {} mode (slug field: {:?})",
                data_source_id,
                host.mode,
                previous_slug_field_id
            );
            return ResyncOutcome::SKIPPED;
        }
    };

    if !host.is_allowed_to(&SYNC_METHODS) {
        tracing::debug!("Not resyncing '{}': sync methods not permitted", data_source_id);
        return ResyncOutcome::SKIPPED;
    }

    match resync(collection, reader, data_source_id, slug_field_id, cancel).await {
        Ok(()) => ResyncOutcome::SYNCED,
        Err(SyncError::MissingSlugField(id)) => {
            tracing::warn!("Slug field '{}' not found in data source '{}'", id, data_source_id);
            notifier.notify(
                &format!(
                    "No field matches the slug field id “{}”. Sync will not be performed.",
                    id
                ),
                Variant::Error,
            );
            ResyncOutcome::SKIPPED
        }
        Err(e) => {
            tracing::error!("Failed to sync collection '{}': {}", data_source_id, e);
            notifier.notify(
                &format!(
                    "Failed to sync collection “{}”. Check the logs for more details.",
                    data_source_id
                ),
                Variant::Error,
            );
            ResyncOutcome::SKIPPED
        }
    }
}

/// Reads the stored metadata and calls [`sync_existing_collection`].
pub async fn resync_from_metadata<C, R>(
    collection: &C,
    reader: &R,
    host: &HostContext,
    notifier: &dyn Notifier,
    cancel: Option<&CancelSignal>,
) -> Result<ResyncOutcome, HostError>
where
    C: ManagedCollection + ?Sized,
    R: DataSourceReader + ?Sized,
{
    let metadata = PersistedSyncMetadata::load(collection).await?;
    Ok(sync_existing_collection(
        collection,
        reader,
        host,
        notifier,
        metadata.data_source_id.as_deref(),
        metadata.slug_field_id.as_deref(),
        cancel,
    )
    .await)
}

async fn resync<C, R>(
    collection: &C,
    reader: &R,
    data_source_id: &str,
    slug_field_id: &str,
    cancel: Option<&CancelSignal>,
) -> Result<(), SyncError>
where
    C: ManagedCollection + ?Sized,
    R: DataSourceReader + ?Sized,
{
    let data_source = reader.fetch(data_source_id, cancel).await?;
    let existing_fields = collection.get_fields().await?;

    let slug_field = data_source
        .field(slug_field_id)
        .cloned()
        .ok_or_else(|| SyncError::MissingSlugField(slug_field_id.to_string()))?;

    sync_collection(collection, &data_source, &existing_fields, &slug_field).await?;
    Ok(())
}
