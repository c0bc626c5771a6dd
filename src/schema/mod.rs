//! Class (schema) subsystem
//!
//! Classes describe the documents the engine validates: their fields, which
//! fields are transient, which fields hold nested documents, and which
//! validators are bound to each field.
//!
//! # Design Principles
//!
//! - Classes are immutable once registered
//! - Validator params are parsed at registration, never during validation
//! - Validation order is explicit and deterministic

mod errors;
mod loader;
mod registry;
mod types;

pub use errors::{SchemaFault, SchemaResult, Severity};
pub use loader::ClassLoader;
pub use registry::ClassRegistry;
pub use types::{
    BindingDef, BoundValidator, Class, ClassDef, FieldDef, FieldDescriptor, FieldKind, FieldType,
};
