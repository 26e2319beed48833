//! First-time configuration of a managed collection.

use super::collection::{sync_collection, SyncSummary};
use super::error::SyncError;
use super::fields::merge_fields_with_existing_fields;
use crate::host::{
    HostContext, HostError, ManagedCollection, Notifier, ProtectedMethod, Variant, SYNC_METHODS,
};
use crate::models::FieldDescriptor;
use crate::source::{field_ids, CancelSignal, DataSourceReader, ARTICLES_DATA_SOURCE_ID};

/// Which fields to import and which one keys the items.
#[derive(Debug, Clone, Default)]
pub struct FieldSelection {
    /// Defaults to `article_id`.
    pub slug_field_id: Option<String>,
    /// `None` imports every field. The slug field is always imported.
    pub field_ids: Option<Vec<String>>,
}

impl FieldSelection {
    fn slug_field_id(&self) -> &str {
        self.slug_field_id
            .as_deref()
            .unwrap_or(field_ids::ARTICLE_ID)
    }

    fn includes(&self, field: &FieldDescriptor) -> bool {
        field.id == self.slug_field_id()
            || self
                .field_ids
                .as_ref()
                .map_or(true, |ids| ids.iter().any(|id| *id == field.id))
    }
}

/// Loads the articles data source and syncs it into a fresh or existing
/// collection.
///
/// Display names the user already gave to fields are kept. The chosen fields
/// become the collection's schema before the items are written. Nothing is
/// written if `cancel` fires before the fetch completes.
pub async fn configure_collection<C, R>(
    collection: &C,
    reader: &R,
    host: &HostContext,
    notifier: &dyn Notifier,
    selection: &FieldSelection,
    cancel: Option<&CancelSignal>,
) -> Result<SyncSummary, SyncError>
where
    C: ManagedCollection + ?Sized,
    R: DataSourceReader + ?Sized,
{
    let mut required = SYNC_METHODS.to_vec();
    required.push(ProtectedMethod::SetFields);
    if !host.is_allowed_to(&required) {
        return Err(HostError::Rejected("collection is read-only".to_string()).into());
    }

    let data_source = match reader.fetch(ARTICLES_DATA_SOURCE_ID, cancel).await {
        Ok(data_source) => data_source,
        Err(e) => {
            tracing::error!("Failed to load data source '{}': {}", ARTICLES_DATA_SOURCE_ID, e);
            notifier.notify(
                &format!(
                    "Failed to load data source “{}”.",
                    ARTICLES_DATA_SOURCE_ID
                ),
                Variant::Error,
            );
            return Err(e);
        }
    };

    let slug_field_id = selection.slug_field_id();
    let slug_field = data_source
        .field(slug_field_id)
        .cloned()
        .ok_or_else(|| SyncError::MissingSlugField(slug_field_id.to_string()))?;

    if let Some(ids) = &selection.field_ids {
        for id in ids.iter().filter(|id| data_source.field(id).is_none()) {
            tracing::warn!("Ignoring unknown field '{}'", id);
        }
    }

    let existing_fields = collection.get_fields().await?;
    let fields: Vec<FieldDescriptor> =
        merge_fields_with_existing_fields(&data_source.fields, &existing_fields)
            .into_iter()
            .filter(|field| selection.includes(field))
            .collect();

    collection.set_fields(&fields).await?;

    match sync_collection(collection, &data_source, &fields, &slug_field).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            tracing::error!("Failed to sync collection '{}': {}", data_source.id, e);
            notifier.notify(
                &format!(
                    "Failed to sync collection “{}”. Check the logs for more details.",
                    data_source.id
                ),
                Variant::Error,
            );
            Err(e)
        }
    }
}
