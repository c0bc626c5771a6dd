//! Validator kinds and their registry
//!
//! Built-in kinds are grouped by what they check:
//! - existence: required, null, notNull
//! - type: string, number, integer, boolean, array, object, email
//! - size: length, minLength, maxLength
//! - comparison: gt, gte, lt, lte
//! - string: regexp, choice
//!
//! Every kind parses its param when a class binds it, so a bad param fails
//! at declaration time rather than while a document is being validated.

mod comparison;
mod definition;
mod existence;
mod registry;
mod size;
mod string;
mod type_check;

pub use definition::{display_param, ValidatorDefinition};
pub use registry::{global, install, ValidatorRegistry};

use serde_json::Value;

use crate::schema::{SchemaFault, SchemaResult};

/// All built-in definitions.
pub(crate) fn builtins() -> Vec<ValidatorDefinition> {
    let mut all = Vec::new();
    all.extend(existence::definitions());
    all.extend(type_check::definitions());
    all.extend(size::definitions());
    all.extend(comparison::definitions());
    all.extend(string::definitions());
    all
}

/// Param parser for kinds that take no param.
fn no_param(kind: &'static str) -> impl Fn(&Value) -> SchemaResult<Value> + Send + Sync {
    move |raw| {
        if raw.is_null() {
            Ok(Value::Null)
        } else {
            Err(SchemaFault::invalid_param(
                kind,
                format!("The \"{}\" validator does not take a parameter", kind),
            ))
        }
    }
}

/// Param parser for kinds that require a number.
fn number_param(kind: &'static str) -> impl Fn(&Value) -> SchemaResult<Value> + Send + Sync {
    move |raw| {
        if raw.is_number() {
            Ok(raw.clone())
        } else {
            Err(SchemaFault::invalid_param(
                kind,
                format!("Parameter for the \"{}\" validator has to be a number", kind),
            ))
        }
    }
}

/// Reads a parsed numeric param.
fn param_f64(kind: &str, param: &Value) -> SchemaResult<f64> {
    param.as_f64().ok_or_else(|| {
        SchemaFault::invalid_param(
            kind,
            format!("Parameter for the \"{}\" validator has to be a number", kind),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_are_unique() {
        let defs = builtins();
        let names: HashSet<&str> = defs.iter().map(|d| d.name()).collect();
        assert_eq!(names.len(), defs.len());
    }

    #[test]
    fn test_builtin_catalog() {
        let registry = ValidatorRegistry::with_builtins();
        for kind in [
            "required", "null", "notNull", "string", "number", "integer", "boolean", "array",
            "object", "email", "length", "minLength", "maxLength", "gt", "gte", "lt", "lte",
            "regexp", "choice",
        ] {
            assert!(registry.contains(kind), "missing {}", kind);
        }
    }

    #[test]
    fn test_no_param_rejects_values() {
        let parse = no_param("required");
        assert!(parse(&Value::Null).is_ok());
        assert!(parse(&Value::Bool(true)).is_err());
    }
}
