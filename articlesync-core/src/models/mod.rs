mod data_source;
mod field;
mod item;

pub use data_source::DataSource;
pub use field::{FieldData, FieldDescriptor, FieldType, FieldValue};
pub use item::CollectionItem;
