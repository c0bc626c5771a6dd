//! Documents under validation
//!
//! A document is an instance of a registered class: the class name plus a
//! JSON object holding field values. Nested documents are plain JSON objects
//! stored under object or list fields; the owning field's descriptor names
//! their class.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An owned document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    class: String,
    values: Map<String, Value>,
}

impl Document {
    /// Create a document of `class` with the given field values.
    pub fn new(class: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            class: class.into(),
            values,
        }
    }

    /// Create a document from a JSON value.
    ///
    /// Returns `None` unless the value is a JSON object.
    pub fn from_json(class: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self::new(class, values)),
            _ => None,
        }
    }

    /// Returns the class name
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the current value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Sets a field value, returning the previous one
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(field.into(), value)
    }

    /// Returns all field values
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Borrowed view used by the validation engine
    pub fn view(&self) -> DocumentRef<'_> {
        DocumentRef::new(&self.class, &self.values)
    }
}

/// A borrowed document: either a root [`Document`] or a nested JSON object
/// inside one.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    class: &'a str,
    values: &'a Map<String, Value>,
}

impl<'a> DocumentRef<'a> {
    pub fn new(class: &'a str, values: &'a Map<String, Value>) -> Self {
        Self { class, values }
    }

    pub fn class(&self) -> &'a str {
        self.class
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.values.get(field)
    }
}

/// Returns the JSON type name for messages and faults.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
