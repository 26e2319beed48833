//! Slug-based reconciliation of a data source into a managed collection.

use std::collections::{HashMap, HashSet};

use super::error::{SyncError, ValidationError};
use crate::host::{plugin_keys, ManagedCollection};
use crate::models::{CollectionItem, DataSource, FieldData, FieldDescriptor};

/// Outcome of one collection sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Items written through `add_items`
    pub upserted: usize,
    /// Previously present items that were removed
    pub removed: usize,
    /// Items left out because their slug was missing or invalid
    pub skipped: Vec<ValidationError>,
}

/// Makes the collection mirror `data_source`.
///
/// Each item is keyed by the value of `slug_field`, which must be a non-empty
/// string; items without one are skipped and logged. Only fields listed in
/// `fields` are written. Items in the collection that no longer appear in the
/// data source are removed, then every valid item is written, changed or not.
/// Finally the data source id and slug field id are stored as plugin data.
///
/// Calls are issued in that order and are not atomic as a group: a failure
/// part way leaves whatever the host already applied.
pub async fn sync_collection<C>(
    collection: &C,
    data_source: &DataSource,
    fields: &[FieldDescriptor],
    slug_field: &FieldDescriptor,
) -> Result<SyncSummary, SyncError>
where
    C: ManagedCollection + ?Sized,
{
    let existing_ids = collection.get_item_ids().await?;
    let mut stale: HashSet<&str> = existing_ids.iter().map(String::as_str).collect();

    let selected: HashSet<&str> = fields.iter().map(|field| field.id.as_str()).collect();
    let mut items: Vec<CollectionItem> = Vec::with_capacity(data_source.items.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut skipped = Vec::new();

    for (index, item) in data_source.items.iter().enumerate() {
        let slug = match slug_value(item, slug_field, index) {
            Ok(slug) => slug,
            Err(e) => {
                tracing::warn!("{}", e);
                skipped.push(e);
                continue;
            }
        };

        stale.remove(slug);

        let field_data: FieldData = item
            .iter()
            .filter(|(id, _)| selected.contains(id.as_str()))
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();
        let staged = CollectionItem::published(slug, field_data);

        // A repeated slug replaces the earlier record.
        match positions.get(slug) {
            Some(&position) => items[position] = staged,
            None => {
                positions.insert(slug.to_string(), items.len());
                items.push(staged);
            }
        }
    }

    let removed: Vec<String> = existing_ids
        .iter()
        .filter(|id| stale.contains(id.as_str()))
        .cloned()
        .collect();

    tracing::debug!(
        "Syncing data source '{}': {} to write, {} to remove, {} skipped",
        data_source.id,
        items.len(),
        removed.len(),
        skipped.len()
    );

    collection.remove_items(&removed).await?;
    collection.add_items(&items).await?;

    collection
        .set_plugin_data(plugin_keys::DATA_SOURCE_ID, Some(data_source.id.as_str()))
        .await?;
    collection
        .set_plugin_data(plugin_keys::SLUG_FIELD_ID, Some(slug_field.id.as_str()))
        .await?;

    tracing::info!(
        "Synced data source '{}' ({} items, {} removed)",
        data_source.id,
        items.len(),
        removed.len()
    );

    Ok(SyncSummary {
        upserted: items.len(),
        removed: removed.len(),
        skipped,
    })
}

fn slug_value<'a>(
    item: &'a FieldData,
    slug_field: &FieldDescriptor,
    index: usize,
) -> Result<&'a str, ValidationError> {
    let value = item
        .get(&slug_field.id)
        .ok_or(ValidationError::MissingSlug { index })?;
    value
        .as_slug()
        .ok_or(ValidationError::InvalidSlug { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, MemoryCollection};
    use crate::models::{FieldType, FieldValue};
    use crate::source::{article_fields, field_ids};
    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::Mutex;

    fn article(id: Value, title: &str) -> FieldData {
        let mut data = FieldData::new();
        data.insert(
            field_ids::ARTICLE_ID.into(),
            FieldValue::new(FieldType::String, id),
        );
        data.insert(field_ids::TITLE.into(), FieldValue::new(FieldType::String, title));
        data.insert(
            field_ids::DATE.into(),
            FieldValue::new(FieldType::Date, "2024-01-01"),
        );
        data.insert(field_ids::IMAGE.into(), FieldValue::new(FieldType::Image, "u"));
        data.insert(
            field_ids::CONTENT.into(),
            FieldValue::new(FieldType::FormattedText, "c"),
        );
        data
    }

    fn source(items: Vec<FieldData>) -> DataSource {
        DataSource {
            id: "articles".into(),
            fields: article_fields(),
            items,
        }
    }

    fn slug_field() -> FieldDescriptor {
        article_fields().remove(0)
    }

    async fn sorted_ids(collection: &MemoryCollection) -> Vec<String> {
        let mut ids = collection.get_item_ids().await.unwrap();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_single_article_into_empty_collection() {
        let collection = MemoryCollection::new();
        let data = source(vec![article("1".into(), "T")]);

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(summary.upserted, 1);
        assert_eq!(summary.removed, 0);
        let item = collection.item("1").await.unwrap();
        assert_eq!(item.slug, "1");
        assert!(!item.draft);
        assert_eq!(item.field_data.len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_slugs_are_excluded() {
        let mut no_slug = article("x".into(), "No slug");
        no_slug.remove(field_ids::ARTICLE_ID);

        let data = source(vec![
            article("1".into(), "One"),
            article("".into(), "Empty"),
            article(Value::Null, "Null"),
            article(Value::from(7_i64), "Number"),
            no_slug,
            article("2".into(), "Two"),
        ]);
        let collection = MemoryCollection::new();

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(sorted_ids(&collection).await, vec!["1", "2"]);
        assert_eq!(
            summary.skipped,
            vec![
                ValidationError::InvalidSlug { index: 1 },
                ValidationError::InvalidSlug { index: 2 },
                ValidationError::InvalidSlug { index: 3 },
                ValidationError::MissingSlug { index: 4 },
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_slug_does_not_protect_existing_item() {
        // An item whose slug can't be read does not count as "still present".
        let collection = MemoryCollection::with_items(vec![CollectionItem::published(
            "old",
            FieldData::new(),
        )]);
        let data = source(vec![article(Value::Null, "old")]);

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(summary.removed, 1);
        assert!(collection.get_item_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_items_removed_and_present_items_kept() {
        let collection = MemoryCollection::with_items(vec![
            CollectionItem::published("1", FieldData::new()),
            CollectionItem::published("gone", FieldData::new()),
        ]);
        let data = source(vec![article("1".into(), "One"), article("3".into(), "Three")]);

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(summary.removed, 1);
        assert_eq!(sorted_ids(&collection).await, vec!["1", "3"]);
        let refreshed = collection.item("1").await.unwrap();
        assert_eq!(refreshed.field_data["title"].value, "One");
    }

    #[tokio::test]
    async fn test_only_selected_fields_are_written() {
        let collection = MemoryCollection::new();
        let mut record = article("1".into(), "T");
        record.insert("unknown".into(), FieldValue::new(FieldType::String, "x"));
        let data = source(vec![record]);

        let selected: Vec<FieldDescriptor> = data
            .fields
            .iter()
            .filter(|f| f.id == field_ids::ARTICLE_ID || f.id == field_ids::TITLE)
            .cloned()
            .collect();
        sync_collection(&collection, &data, &selected, &slug_field())
            .await
            .unwrap();

        let item = collection.item("1").await.unwrap();
        let keys: Vec<_> = item.field_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["article_id", "title"]);
    }

    #[tokio::test]
    async fn test_slug_field_need_not_be_selected() {
        let collection = MemoryCollection::new();
        let data = source(vec![article("1".into(), "T")]);
        let selected = vec![FieldDescriptor::new("title", "Title", FieldType::String)];

        sync_collection(&collection, &data, &selected, &slug_field())
            .await
            .unwrap();

        let item = collection.item("1").await.unwrap();
        assert_eq!(item.id, "1");
        assert_eq!(item.field_data.len(), 1);
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let collection = MemoryCollection::new();
        let data = source(vec![article("1".into(), "One"), article("2".into(), "Two")]);

        sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();
        let first = collection.get_items().await;

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();
        assert_eq!(summary.removed, 0);
        assert_eq!(collection.get_items().await, first);
    }

    #[tokio::test]
    async fn test_duplicate_slug_keeps_last_record() {
        let collection = MemoryCollection::new();
        let data = source(vec![article("1".into(), "First"), article("1".into(), "Second")]);

        let summary = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(summary.upserted, 1);
        let items = collection.get_items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].field_data["title"].value, "Second");
    }

    #[tokio::test]
    async fn test_metadata_written() {
        let collection = MemoryCollection::new();
        let data = source(vec![article("1".into(), "T")]);

        sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(
            collection
                .get_plugin_data(plugin_keys::DATA_SOURCE_ID)
                .await
                .unwrap(),
            Some("articles".to_string())
        );
        assert_eq!(
            collection
                .get_plugin_data(plugin_keys::SLUG_FIELD_ID)
                .await
                .unwrap(),
            Some("article_id".to_string())
        );
    }

    /// Records removals and can fail `add_items`.
    #[derive(Default)]
    struct RecordingCollection {
        inner: MemoryCollection,
        removed: Mutex<Vec<String>>,
        fail_add: bool,
    }

    #[async_trait]
    impl ManagedCollection for RecordingCollection {
        async fn get_item_ids(&self) -> Result<Vec<String>, HostError> {
            self.inner.get_item_ids().await
        }

        async fn get_fields(&self) -> Result<Vec<FieldDescriptor>, HostError> {
            self.inner.get_fields().await
        }

        async fn set_fields(&self, fields: &[FieldDescriptor]) -> Result<(), HostError> {
            self.inner.set_fields(fields).await
        }

        async fn add_items(&self, items: &[CollectionItem]) -> Result<(), HostError> {
            if self.fail_add {
                return Err(HostError::Rejected("addItems".into()));
            }
            self.inner.add_items(items).await
        }

        async fn remove_items(&self, ids: &[String]) -> Result<(), HostError> {
            self.removed.lock().await.extend_from_slice(ids);
            self.inner.remove_items(ids).await
        }

        async fn set_plugin_data(&self, key: &str, value: Option<&str>) -> Result<(), HostError> {
            self.inner.set_plugin_data(key, value).await
        }

        async fn get_plugin_data(&self, key: &str) -> Result<Option<String>, HostError> {
            self.inner.get_plugin_data(key).await
        }
    }

    #[tokio::test]
    async fn test_stale_ids_removed_exactly_once() {
        let collection = RecordingCollection {
            inner: MemoryCollection::with_items(vec![
                CollectionItem::published("a", FieldData::new()),
                CollectionItem::published("b", FieldData::new()),
                CollectionItem::published("c", FieldData::new()),
            ]),
            ..Default::default()
        };
        let data = source(vec![article("b".into(), "B")]);

        sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap();

        assert_eq!(*collection.removed.lock().await, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_host_failure_aborts_before_metadata() {
        let collection = RecordingCollection {
            fail_add: true,
            ..Default::default()
        };
        let data = source(vec![article("1".into(), "T")]);

        let err = sync_collection(&collection, &data, &data.fields, &slug_field())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Host(HostError::Rejected(_))));
        assert_eq!(
            collection
                .get_plugin_data(plugin_keys::DATA_SOURCE_ID)
                .await
                .unwrap(),
            None
        );
    }
}
