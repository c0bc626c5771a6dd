//! String validators: regexp, choice

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{display_param, ValidatorDefinition};
use crate::document::json_type_name;
use crate::schema::{SchemaFault, SchemaResult};

// Patterns are compiled when a class binds them and reused on every check.
static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn compile(pattern: &str) -> SchemaResult<Regex> {
    let mut cache = REGEX_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern).map_err(|e| {
        SchemaFault::invalid_param("regexp", format!("Invalid pattern for the \"regexp\" validator: {}", e))
    })?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

fn parse_pattern(raw: &Value) -> SchemaResult<Value> {
    let pattern = raw.as_str().ok_or_else(|| {
        SchemaFault::invalid_param("regexp", "Parameter for the \"regexp\" validator has to be a string")
    })?;
    compile(pattern)?;
    Ok(raw.clone())
}

fn parse_choices(raw: &Value) -> SchemaResult<Value> {
    if raw.is_array() {
        Ok(raw.clone())
    } else {
        Err(SchemaFault::invalid_param(
            "choice",
            "Parameter for the \"choice\" validator has to be an array",
        ))
    }
}

fn matches(value: &Value, param: &Value) -> SchemaResult<bool> {
    let text = value
        .as_str()
        .ok_or_else(|| SchemaFault::incompatible("regexp", json_type_name(value)))?;
    let pattern = param.as_str().ok_or_else(|| {
        SchemaFault::invalid_param("regexp", "Parameter for the \"regexp\" validator has to be a string")
    })?;
    Ok(compile(pattern)?.is_match(text))
}

pub(super) fn definitions() -> Vec<ValidatorDefinition> {
    vec![
        ValidatorDefinition::new(
            "regexp",
            matches,
            |name, param| format!("\"{}\" has to match {}", name, display_param(param)),
        )
        .with_param_parser(parse_pattern),
        ValidatorDefinition::new(
            "choice",
            |value, param| {
                Ok(param
                    .as_array()
                    .map_or(false, |choices| choices.contains(value)))
            },
            |name, param| {
                format!(
                    "\"{}\" has to be one of the values {}",
                    name,
                    display_param(param)
                )
            },
        )
        .with_param_parser(parse_choices),
    ]
}
