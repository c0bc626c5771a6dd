//! Validation options
//!
//! Callers choose which fields to validate and whether to stop on the first
//! failure. The `From` conversions cover the short call shapes:
//!
//! | call                                   | fields          | stop on first |
//! |----------------------------------------|-----------------|---------------|
//! | `validate(&doc, ())`                   | all, in order   | true          |
//! | `validate(&doc, "code")`               | `[code]`        | true          |
//! | `validate(&doc, vec!["a", "b"])`       | `[a, b]`        | true          |
//! | `validate(&doc, false)`                | all, in order   | false         |
//! | `validate(&doc, (vec!["a"], false))`   | `[a]`           | false         |

use crate::schema::Class;

/// Which fields to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    One(String),
    Many(Vec<String>),
}

impl FieldSelector {
    fn into_names(self) -> Vec<String> {
        match self {
            FieldSelector::One(name) => vec![name],
            FieldSelector::Many(names) => names,
        }
    }
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        FieldSelector::One(name.to_string())
    }
}

impl From<String> for FieldSelector {
    fn from(name: String) -> Self {
        FieldSelector::One(name)
    }
}

impl From<Vec<String>> for FieldSelector {
    fn from(names: Vec<String>) -> Self {
        FieldSelector::Many(names)
    }
}

impl From<Vec<&str>> for FieldSelector {
    fn from(names: Vec<&str>) -> Self {
        FieldSelector::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FieldSelector {
    fn from(names: &[&str]) -> Self {
        FieldSelector::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Options for one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Fields to validate; every field in validation order when `None`
    pub fields: Option<FieldSelector>,
    /// Stop at the first failure; `true` when `None`
    pub stop_on_first_error: Option<bool>,
}

impl ValidateOptions {
    /// All fields, strict.
    pub fn all() -> Self {
        Self::default()
    }

    /// All fields, collecting every failure.
    pub fn tolerant() -> Self {
        Self::default().stop_on_first_error(false)
    }

    pub fn fields(selector: impl Into<FieldSelector>) -> Self {
        Self {
            fields: Some(selector.into()),
            stop_on_first_error: None,
        }
    }

    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = Some(stop);
        self
    }

    /// Resolves the field list and the stop flag against `class`.
    pub(crate) fn resolve(self, class: &Class) -> (Vec<String>, bool) {
        let fields = match self.fields {
            Some(selector) => selector.into_names(),
            None => class.validation_order().to_vec(),
        };
        (fields, self.stop_on_first_error.unwrap_or(true))
    }
}

impl From<()> for ValidateOptions {
    fn from(_: ()) -> Self {
        Self::all()
    }
}

/// A lone flag is the stop-on-first-error flag, over all fields.
impl From<bool> for ValidateOptions {
    fn from(stop: bool) -> Self {
        Self::all().stop_on_first_error(stop)
    }
}

impl From<FieldSelector> for ValidateOptions {
    fn from(selector: FieldSelector) -> Self {
        Self::fields(selector)
    }
}

impl From<&str> for ValidateOptions {
    fn from(name: &str) -> Self {
        Self::fields(name)
    }
}

impl From<String> for ValidateOptions {
    fn from(name: String) -> Self {
        Self::fields(name)
    }
}

impl From<Vec<String>> for ValidateOptions {
    fn from(names: Vec<String>) -> Self {
        Self::fields(names)
    }
}

impl From<Vec<&str>> for ValidateOptions {
    fn from(names: Vec<&str>) -> Self {
        Self::fields(names)
    }
}

impl From<&[&str]> for ValidateOptions {
    fn from(names: &[&str]) -> Self {
        Self::fields(names)
    }
}

impl<S: Into<FieldSelector>> From<(S, bool)> for ValidateOptions {
    fn from((selector, stop): (S, bool)) -> Self {
        Self::fields(selector).stop_on_first_error(stop)
    }
}
