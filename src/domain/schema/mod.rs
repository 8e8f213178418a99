//! JSON schema for chart values (`values.schema.json`).
//!
//! Helm validates user values against this document before templating, so
//! every built-in values model describes itself here with the exact property
//! names it serializes under.

use serde_json::{Map, Value, json};

use crate::domain::values::DagsterHelmValues;

const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// A values model that can describe itself as a JSON schema object.
pub trait ValuesSchema {
    fn schema() -> Value;
}

/// Builder for `"type": "object"` schemas.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    title: String,
    properties: Map<String, Value>,
    required: Vec<String>,
    additional_properties: bool,
}

impl ObjectSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            properties: Map::new(),
            required: Vec::new(),
            additional_properties: false,
        }
    }

    pub fn required(mut self, name: &str, schema: Value) -> Self {
        self.required.push(name.to_string());
        self.properties.insert(name.to_string(), schema);
        self
    }

    pub fn optional(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    /// Allow properties not listed in the schema.
    pub fn open(mut self) -> Self {
        self.additional_properties = true;
        self
    }

    pub fn build(self) -> Value {
        let mut schema = Map::new();
        schema.insert("title".to_string(), Value::String(self.title));
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(self.properties));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema.insert("additionalProperties".to_string(), Value::Bool(self.additional_properties));
        Value::Object(schema)
    }
}

pub fn string() -> Value {
    json!({ "type": "string" })
}

pub fn boolean() -> Value {
    json!({ "type": "boolean" })
}

pub fn integer_min(minimum: i64) -> Value {
    json!({ "type": "integer", "minimum": minimum })
}

pub fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

pub fn string_enum(values: &[&str]) -> Value {
    json!({ "type": "string", "enum": values })
}

/// An object with arbitrary properties.
pub fn free_object() -> Value {
    json!({ "type": "object" })
}

/// The complete `values.schema.json` document for the chart.
pub fn values_schema() -> Value {
    let mut schema = DagsterHelmValues::schema();
    if let Value::Object(map) = &mut schema {
        map.insert("$schema".to_string(), Value::String(JSON_SCHEMA_DRAFT.to_string()));
    }
    schema
}

/// Property names of an object schema.
pub fn property_names(schema: &Value) -> Vec<String> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| properties.keys().cloned().collect())
        .unwrap_or_default()
}
