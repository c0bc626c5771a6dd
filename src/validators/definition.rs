//! Validator definitions
//!
//! A definition is the parse / check / message triple behind one validator
//! kind. Params are parsed once, when a class binds the validator to a
//! field, and the parsed value is what the predicate and the message builder
//! receive later.

use std::fmt;

use serde_json::Value;

use crate::schema::SchemaResult;

type ParseFn = Box<dyn Fn(&Value) -> SchemaResult<Value> + Send + Sync>;
type CheckFn = Box<dyn Fn(&Value, &Value) -> SchemaResult<bool> + Send + Sync>;
type MessageFn = Box<dyn Fn(&str, &Value) -> String + Send + Sync>;

/// One validator kind.
///
/// # Usage
///
/// ```ignore
/// let even = ValidatorDefinition::new(
///     "even",
///     |value, _param| Ok(value.as_i64().map_or(false, |n| n % 2 == 0)),
///     |name, _param| format!("\"{}\" has to be even", name),
/// );
/// registry.register(even)?;
/// ```
pub struct ValidatorDefinition {
    name: String,
    parse_param: ParseFn,
    is_valid: CheckFn,
    resolve_error: MessageFn,
}

impl ValidatorDefinition {
    /// Create a definition whose params pass through unchanged.
    pub fn new<C, M>(name: impl Into<String>, is_valid: C, resolve_error: M) -> Self
    where
        C: Fn(&Value, &Value) -> SchemaResult<bool> + Send + Sync + 'static,
        M: Fn(&str, &Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parse_param: Box::new(|raw| Ok(raw.clone())),
            is_valid: Box::new(is_valid),
            resolve_error: Box::new(resolve_error),
        }
    }

    /// Replace the param parser.
    pub fn with_param_parser<P>(mut self, parse_param: P) -> Self
    where
        P: Fn(&Value) -> SchemaResult<Value> + Send + Sync + 'static,
    {
        self.parse_param = Box::new(parse_param);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalizes a raw param at declaration time.
    pub fn parse_param(&self, raw: &Value) -> SchemaResult<Value> {
        (self.parse_param)(raw)
    }

    /// Checks a value against a parsed param.
    ///
    /// An `Err` means the value can not be checked by this rule at all; it is
    /// a fault, not a failed check.
    pub fn is_valid(&self, value: &Value, param: &Value) -> SchemaResult<bool> {
        (self.is_valid)(value, param)
    }

    /// Builds the failure message for field `name`.
    pub fn resolve_error(&self, name: &str, param: &Value) -> String {
        (self.resolve_error)(name, param)
    }
}

impl fmt::Debug for ValidatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Renders a param for messages: strings bare, everything else as JSON.
pub fn display_param(param: &Value) -> String {
    match param {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
