//! Existence validators: required, null, notNull

use super::{no_param, ValidatorDefinition};

pub(super) fn definitions() -> Vec<ValidatorDefinition> {
    vec![
        ValidatorDefinition::new(
            "required",
            |value, _| Ok(!value.is_null()),
            |name, _| format!("\"{}\" is required", name),
        )
        .with_param_parser(no_param("required")),
        ValidatorDefinition::new(
            "null",
            |value, _| Ok(value.is_null()),
            |name, _| format!("\"{}\" has to be null", name),
        )
        .with_param_parser(no_param("null")),
        ValidatorDefinition::new(
            "notNull",
            |value, _| Ok(!value.is_null()),
            |name, _| format!("\"{}\" can not be null", name),
        )
        .with_param_parser(no_param("notNull")),
    ]
}
