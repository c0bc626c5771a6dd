//! aerovalidate - Declarative field validation for JSON documents
//!
//! Classes declare fields and the validators bound to them; the engine checks
//! documents against their class, stopping at the first failure or collecting
//! every one.
//!
//! ```ignore
//! use aerovalidate::{ClassDef, ClassRegistry, Document, Engine, FieldDef, ValidatorRegistry};
//! use serde_json::json;
//!
//! let validators = ValidatorRegistry::with_builtins();
//! let mut classes = ClassRegistry::new();
//! classes.register(
//!     ClassDef::new("User", vec![FieldDef::string("code").validator("length", json!(5))]),
//!     &validators,
//! )?;
//!
//! let doc = Document::from_json("User", json!({ "code": "ab" })).unwrap();
//! let err = Engine::new(&classes, &validators).validate(&doc, ()).unwrap_err();
//! assert_eq!(err.to_string(), "Length of \"code\" has to be 5");
//! ```

pub mod cli;
pub mod document;
pub mod engine;
pub mod observability;
pub mod schema;
pub mod validators;

pub use document::{Document, DocumentRef};
pub use engine::{Engine, FieldSelector, ValidateError, ValidateOptions, ValidationDetail, ValidationReport};
pub use schema::{Class, ClassDef, ClassLoader, ClassRegistry, FieldDef, FieldType, SchemaFault};
pub use validators::{ValidatorDefinition, ValidatorRegistry};
