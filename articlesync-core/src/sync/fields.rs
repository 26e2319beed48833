//! Field schema merging.

use crate::models::FieldDescriptor;

/// Merges a freshly fetched field schema with the one already stored.
///
/// The remote fields decide the set, order and types. A stored field with the
/// same id only contributes its display name. Stored fields the remote no
/// longer has are dropped.
pub fn merge_fields_with_existing_fields(
    remote_fields: &[FieldDescriptor],
    existing_fields: &[FieldDescriptor],
) -> Vec<FieldDescriptor> {
    remote_fields
        .iter()
        .map(|remote| {
            match existing_fields.iter().find(|existing| existing.id == remote.id) {
                Some(existing) => remote.clone().with_name(existing.name.clone()),
                None => remote.clone(),
            }
        })
        .collect()
}
