//! Comparison validators: gt, gte, lt, lte

use serde_json::Value;

use super::{display_param, number_param, param_f64, ValidatorDefinition};
use crate::document::json_type_name;
use crate::schema::{SchemaFault, SchemaResult};

fn number(kind: &str, value: &Value) -> SchemaResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| SchemaFault::incompatible(kind, json_type_name(value)))
}

fn comparison(
    kind: &'static str,
    phrase: &'static str,
    holds: fn(f64, f64) -> bool,
) -> ValidatorDefinition {
    ValidatorDefinition::new(
        kind,
        move |value, param| Ok(holds(number(kind, value)?, param_f64(kind, param)?)),
        move |name, param| format!("\"{}\" has to be {} {}", name, phrase, display_param(param)),
    )
    .with_param_parser(number_param(kind))
}

pub(super) fn definitions() -> Vec<ValidatorDefinition> {
    vec![
        comparison("gt", "greater than", |v, p| v > p),
        comparison("gte", "greater than or equal to", |v, p| v >= p),
        comparison("lt", "less than", |v, p| v < p),
        comparison("lte", "less than or equal to", |v, p| v <= p),
    ]
}
