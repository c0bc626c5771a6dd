//! Class definitions and their resolved form
//!
//! A class definition is what gets declared (usually as JSON). Registering
//! it checks its structure and parses every validator param, producing a
//! [`Class`] that the engine reads without further checks.
//!
//! Supported field types:
//! - string, number, integer, boolean, date, any: scalar
//! - object: nested document of a named class
//! - list: array, optionally of documents of a named class

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::errors::{SchemaFault, SchemaResult};
use crate::validators::ValidatorRegistry;

/// Declared field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Any,
    /// Nested document of `class`
    Object {
        class: String,
    },
    /// Array; elements are documents when `class` is set
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class: Option<String>,
    },
}

impl FieldType {
    /// Returns the type name for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Any => "any",
            FieldType::Object { .. } => "object",
            FieldType::List { .. } => "list",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Object { .. } => FieldKind::Object,
            FieldType::List { .. } => FieldKind::List,
            _ => FieldKind::Scalar,
        }
    }

    /// Class of nested documents held by this field, if any
    pub fn nested_class(&self) -> Option<&str> {
        match self {
            FieldType::Object { class } => Some(class),
            FieldType::List { class } => class.as_deref(),
            _ => None,
        }
    }
}

/// Field kinds the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Object,
    List,
}

/// A validator binding as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingDef {
    /// Validator kind
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw param, parsed at registration
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub param: Value,
}

impl BindingDef {
    pub fn new(kind: impl Into<String>, param: Value) -> Self {
        Self {
            kind: kind.into(),
            param,
        }
    }
}

/// A field as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Transient fields are never validated
    #[serde(default)]
    pub transient: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<BindingDef>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            transient: false,
            validators: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn object(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(name, FieldType::Object { class: class.into() })
    }

    pub fn list_of(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::List {
                class: Some(class.into()),
            },
        )
    }

    /// Marks the field transient
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Binds a validator to the field
    pub fn validator(mut self, kind: impl Into<String>, param: Value) -> Self {
        self.validators.push(BindingDef::new(kind, param));
        self
    }
}

/// A class as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    /// Class-level bindings, run after the field's inline ones
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub validators: HashMap<String, Vec<BindingDef>>,
    /// Field validation order; declaration order when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_order: Option<Vec<String>>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
            validators: HashMap::new(),
            validation_order: None,
        }
    }

    /// Adds a class-level binding
    pub fn validator(mut self, field: impl Into<String>, kind: impl Into<String>, param: Value) -> Self {
        self.validators
            .entry(field.into())
            .or_default()
            .push(BindingDef::new(kind, param));
        self
    }

    pub fn with_validation_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validation_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the definition's structure (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Class name must not be empty".into());
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("Field names must not be empty".into());
            }
            if !names.insert(field.name.as_str()) {
                return Err(format!("Field '{}' is declared more than once", field.name));
            }
            if let FieldType::Object { class } = &field.field_type {
                if class.trim().is_empty() {
                    return Err(format!("Object field '{}' must name a class", field.name));
                }
            }
        }

        for field in self.validators.keys() {
            if !names.contains(field.as_str()) {
                return Err(format!("Validators declared for unknown field '{}'", field));
            }
        }

        if let Some(order) = &self.validation_order {
            let mut seen = HashSet::new();
            for field in order {
                if !names.contains(field.as_str()) {
                    return Err(format!("Validation order names unknown field '{}'", field));
                }
                if !seen.insert(field.as_str()) {
                    return Err(format!("Validation order lists '{}' more than once", field));
                }
            }
            if seen.len() != names.len() {
                return Err("Validation order must list every field".into());
            }
        }

        Ok(())
    }

    /// Checks the structure and parses every binding param.
    pub(crate) fn resolve(self, validators: &ValidatorRegistry) -> SchemaResult<Class> {
        self.validate_structure()
            .map_err(|e| SchemaFault::malformed(&self.name, e))?;

        let ClassDef {
            name,
            fields,
            validators: mut class_bindings,
            validation_order,
        } = self;

        let validation_order =
            validation_order.unwrap_or_else(|| fields.iter().map(|f| f.name.clone()).collect());

        let mut resolved_fields = HashMap::with_capacity(fields.len());
        let mut resolved_bindings = HashMap::new();

        for field in fields {
            let declared = field
                .validators
                .iter()
                .chain(class_bindings.remove(&field.name).unwrap_or_default().iter())
                .map(|binding| -> SchemaResult<BoundValidator> {
                    Ok(BoundValidator {
                        kind: binding.kind.clone(),
                        param: validators.resolve_param(&binding.kind, &binding.param)?,
                    })
                })
                .collect::<SchemaResult<Vec<_>>>()?;

            if !declared.is_empty() {
                resolved_bindings.insert(field.name.clone(), declared);
            }
            resolved_fields.insert(
                field.name.clone(),
                FieldDescriptor {
                    name: field.name,
                    field_type: field.field_type,
                    transient: field.transient,
                },
            );
        }

        Ok(Class {
            name,
            fields: resolved_fields,
            bindings: resolved_bindings,
            validation_order,
        })
    }
}

/// Field metadata read by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub transient: bool,
}

impl FieldDescriptor {
    pub fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }

    pub fn nested_class(&self) -> Option<&str> {
        self.field_type.nested_class()
    }
}

/// A validator bound to a field, with its parsed param
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValidator {
    pub kind: String,
    pub param: Value,
}

/// A registered class
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    name: String,
    fields: HashMap<String, FieldDescriptor>,
    bindings: HashMap<String, Vec<BoundValidator>>,
    validation_order: Vec<String>,
}

impl Class {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in validation order
    pub fn validation_order(&self) -> &[String] {
        &self.validation_order
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Bindings of a field, `None` when it has none
    pub fn validators(&self, name: &str) -> Option<&[BoundValidator]> {
        self.bindings.get(name).map(Vec::as_slice)
    }

    /// Field descriptors in validation order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.validation_order
            .iter()
            .filter_map(move |name| self.fields.get(name))
    }
}
