//! Articles API record format and its mapping onto collection fields.

use serde_json::{Map, Value};

use crate::models::{FieldData, FieldDescriptor, FieldType, FieldValue};

/// Field ids exposed by the articles data source.
pub mod field_ids {
    pub const ARTICLE_ID: &str = "article_id";
    pub const TITLE: &str = "title";
    pub const DATE: &str = "date";
    pub const IMAGE: &str = "image";
    pub const CONTENT: &str = "content";
}

/// (field id, display name, type, attribute in the API response)
const ARTICLE_FIELDS: [(&str, &str, FieldType, &str); 5] = [
    (field_ids::ARTICLE_ID, "article_id", FieldType::String, "article_id"),
    (field_ids::TITLE, "Title", FieldType::String, "title"),
    (field_ids::DATE, "Date", FieldType::Date, "date_created"),
    (field_ids::IMAGE, "Image", FieldType::Image, "header_image_url"),
    (field_ids::CONTENT, "Content", FieldType::FormattedText, "full_text"),
];

/// The fixed field schema of the articles API, in display order.
pub fn article_fields() -> Vec<FieldDescriptor> {
    ARTICLE_FIELDS
        .iter()
        .map(|(id, name, field_type, _)| FieldDescriptor::new(*id, *name, *field_type))
        .collect()
}

/// Maps one API record onto the article fields.
///
/// Missing attributes become null values. A numeric `article_id` is turned
/// into its decimal string so it can serve as a slug.
pub fn article_to_item(record: &Map<String, Value>) -> FieldData {
    ARTICLE_FIELDS
        .iter()
        .map(|(id, _, field_type, attribute)| {
            let value = match record.get(*attribute) {
                Some(Value::Number(n)) if *id == field_ids::ARTICLE_ID => {
                    Value::String(n.to_string())
                }
                Some(value) => value.clone(),
                None => Value::Null,
            };
            (id.to_string(), FieldValue::new(*field_type, value))
        })
        .collect()
}

/// Parses a response body into API records.
pub fn parse_articles(body: &str) -> Result<Vec<Map<String, Value>>, serde_json::Error> {
    serde_json::from_str(body)
}
