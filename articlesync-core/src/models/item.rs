use serde::{Deserialize, Serialize};

use super::field::FieldData;

/// An item as written to a managed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: String,
    pub slug: String,
    pub draft: bool,
    pub field_data: FieldData,
}

impl CollectionItem {
    /// Creates a published item whose id and slug are both `slug`.
    pub fn published(slug: impl Into<String>, field_data: FieldData) -> Self {
        let slug = slug.into();
        Self {
            id: slug.clone(),
            slug,
            draft: false,
            field_data,
        }
    }
}
