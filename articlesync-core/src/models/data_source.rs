use serde::{Deserialize, Serialize};

use super::field::{FieldData, FieldDescriptor};

/// One fetched snapshot of a remote dataset.
///
/// Only `id` and the field schema outlive a sync; items are consumed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub fields: Vec<FieldDescriptor>,
    pub items: Vec<FieldData>,
}

impl DataSource {
    /// Looks up a field of this data source by id.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == id)
    }
}
