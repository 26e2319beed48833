use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Value types a managed collection field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Image,
    File,
    Link,
    Color,
    FormattedText,
    Enum,
    CollectionReference,
    MultiCollectionReference,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::Link => "link",
            FieldType::Color => "color",
            FieldType::FormattedText => "formattedText",
            FieldType::Enum => "enum",
            FieldType::CollectionReference => "collectionReference",
            FieldType::MultiCollectionReference => "multiCollectionReference",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field in a collection schema.
///
/// `id` is the stable identity; `name` is the display label and may be
/// customized locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
        }
    }

    /// Returns a copy with a different display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A typed value stored under one field of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: Value,
}

impl FieldValue {
    pub fn new(field_type: FieldType, value: impl Into<Value>) -> Self {
        Self {
            field_type,
            value: value.into(),
        }
    }

    /// Returns the value if it is a non-empty string.
    pub fn as_slug(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Field id to value mapping for one item.
pub type FieldData = BTreeMap<String, FieldValue>;
