//! Size validators: length, minLength, maxLength
//!
//! Only strings and arrays have a length. Anything else is a fault: binding a
//! size rule to a field that does not hold a sequence is a schema mistake.

use serde_json::Value;

use super::{display_param, number_param, param_f64, ValidatorDefinition};
use crate::schema::{SchemaFault, SchemaResult};

/// Length of a string in characters, or of an array in elements.
pub(crate) fn measure(value: &Value) -> SchemaResult<usize> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        _ => Err(SchemaFault::LengthNotMeasurable),
    }
}

pub(super) fn definitions() -> Vec<ValidatorDefinition> {
    vec![
        ValidatorDefinition::new(
            "length",
            |value, param| Ok((measure(value)? as f64) == param_f64("length", param)?),
            |name, param| format!("Length of \"{}\" has to be {}", name, display_param(param)),
        )
        .with_param_parser(number_param("length")),
        ValidatorDefinition::new(
            "minLength",
            |value, param| Ok((measure(value)? as f64) >= param_f64("minLength", param)?),
            |name, param| {
                format!(
                    "Length of \"{}\" has to be at least {}",
                    name,
                    display_param(param)
                )
            },
        )
        .with_param_parser(number_param("minLength")),
        ValidatorDefinition::new(
            "maxLength",
            |value, param| Ok((measure(value)? as f64) <= param_f64("maxLength", param)?),
            |name, param| {
                format!(
                    "Length of \"{}\" has to be at most {}",
                    name,
                    display_param(param)
                )
            },
        )
        .with_param_parser(number_param("maxLength")),
    ]
}
