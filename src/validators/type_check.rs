//! Type validators: string, number, integer, boolean, array, object, email
//!
//! These never fault; a value of the wrong type is simply invalid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{no_param, ValidatorDefinition};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0),
        _ => false,
    }
}

fn type_definition(
    kind: &'static str,
    article: &'static str,
    check: fn(&Value) -> bool,
) -> ValidatorDefinition {
    ValidatorDefinition::new(
        kind,
        move |value, _| Ok(check(value)),
        move |name, _| format!("\"{}\" has to be {} {}", name, article, kind),
    )
    .with_param_parser(no_param(kind))
}

pub(super) fn definitions() -> Vec<ValidatorDefinition> {
    vec![
        type_definition("string", "a", Value::is_string),
        type_definition("number", "a", Value::is_number),
        type_definition("integer", "an", is_integer),
        type_definition("boolean", "a", Value::is_boolean),
        type_definition("array", "an", Value::is_array),
        type_definition("object", "an", Value::is_object),
        ValidatorDefinition::new(
            "email",
            |value, _| Ok(value.as_str().map_or(false, |s| EMAIL_REGEX.is_match(s))),
            |name, _| format!("\"{}\" has to be a valid email address", name),
        )
        .with_param_parser(no_param("email")),
    ]
}

#[cfg(test)]
mod tests {
    use crate::validators::ValidatorRegistry;
    use serde_json::{json, Value};

    fn check(kind: &str, value: Value) -> bool {
        let registry = ValidatorRegistry::with_builtins();
        registry.get(kind).unwrap().is_valid(&value, &Value::Null).unwrap()
    }

    #[test]
    fn test_basic_types() {
        assert!(check("string", json!("a")));
        assert!(!check("string", json!(1)));
        assert!(check("number", json!(1.5)));
        assert!(!check("number", json!("1")));
        assert!(check("boolean", json!(false)));
        assert!(check("array", json!([])));
        assert!(check("object", json!({})));
        assert!(!check("object", Value::Null));
    }

    #[test]
    fn test_integer() {
        assert!(check("integer", json!(3)));
        assert!(check("integer", json!(-3)));
        assert!(check("integer", json!(3.0)));
        assert!(!check("integer", json!(3.5)));
        assert!(!check("integer", json!("3")));
    }

    #[test]
    fn test_email() {
        assert!(check("email", json!("user@example.com")));
        assert!(!check("email", json!("not-an-email")));
        assert!(!check("email", json!(42)));
    }

    #[test]
    fn test_messages() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(
            registry.message("integer", "age", &Value::Null).unwrap(),
            "\"age\" has to be an integer"
        );
        assert_eq!(
            registry.message("string", "name", &Value::Null).unwrap(),
            "\"name\" has to be a string"
        );
    }
}
