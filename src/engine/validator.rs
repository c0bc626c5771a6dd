//! Field-by-field document validation
//!
//! For each selected field, in order:
//! 1. Transient fields are skipped entirely
//! 2. Bound validators run in declaration order; the first failing one
//!    produces the field's detail
//! 3. Object fields holding a JSON object, and list fields of a document
//!    class, are validated recursively with the same stop flag
//!
//! Strict mode returns the first failure as soon as it is seen. Tolerant
//! mode collects every failure and returns them as one report after the last
//! field. Faults abort in both modes and discard anything collected.

use serde_json::{Map, Value};

use super::options::ValidateOptions;
use super::report::{ValidateError, ValidateResult, ValidationDetail, ValidationReport};
use crate::document::{Document, DocumentRef};
use crate::observability::{Event, Logger, ObservationScope};
use crate::schema::{BoundValidator, Class, ClassRegistry, FieldKind, SchemaFault};
use crate::validators::{self, ValidatorRegistry};

/// Default limit on nested document depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Validation engine.
///
/// Borrows the class and validator registries for its lifetime; neither can
/// change while documents are validated.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    classes: &'a ClassRegistry,
    validators: &'a ValidatorRegistry,
    max_depth: usize,
}

impl<'a> Engine<'a> {
    /// Creates an engine backed by the given registries.
    pub fn new(classes: &'a ClassRegistry, validators: &'a ValidatorRegistry) -> Self {
        Self {
            classes,
            validators,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates an engine that uses the process-wide validator registry.
    pub fn with_global_validators(classes: &'a ClassRegistry) -> Self {
        Self::new(classes, validators::global())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validates a document.
    ///
    /// # Errors
    ///
    /// - `ValidateError::Failed` with one detail (strict) or every detail
    ///   (tolerant) if checks fail
    /// - `ValidateError::Fault` for unknown classes or fields, predicates
    ///   that can not check the value, or nesting deeper than `max_depth`
    pub fn validate(
        &self,
        document: &Document,
        options: impl Into<ValidateOptions>,
    ) -> ValidateResult<()> {
        self.validate_ref(document.view(), options)
    }

    /// Validates a borrowed document.
    pub fn validate_ref(
        &self,
        document: DocumentRef<'_>,
        options: impl Into<ValidateOptions>,
    ) -> ValidateResult<()> {
        let class = self.classes.require(document.class())?;
        let (fields, stop_on_first_error) = options.into().resolve(class);

        let mode = if stop_on_first_error { "strict" } else { "tolerant" };
        let scope = ObservationScope::with_fields(
            "VALIDATION",
            &[("class", class.name()), ("mode", mode)],
        );

        let result = self.validate_fields(class, document, &fields, stop_on_first_error, "", 0);
        match &result {
            Ok(()) => scope.complete(),
            Err(ValidateError::Failed(report)) => {
                let count = report.len().to_string();
                scope.reject(&[("details", count.as_str()), ("message", report.message())]);
            }
            Err(ValidateError::Fault(fault)) => {
                Logger::error(
                    Event::ValidationFault.as_str(),
                    &[("class", class.name()), ("code", fault.code())],
                );
                scope.fail(&fault.to_string());
            }
        }
        result
    }

    fn validate_fields(
        &self,
        class: &Class,
        document: DocumentRef<'_>,
        fields: &[String],
        stop_on_first_error: bool,
        path_prefix: &str,
        depth: usize,
    ) -> ValidateResult<()> {
        let mut errors = Vec::new();

        for field_name in fields {
            let field = class
                .field(field_name)
                .ok_or_else(|| SchemaFault::unknown_field(class.name(), field_name))?;

            // Transient fields are not validated
            if field.transient {
                continue;
            }

            let field_path = make_path(path_prefix, field_name);

            if let Some(bindings) = class.validators(field_name) {
                catch_validation_error(
                    self.run_bindings(document, field_name, &field_path, bindings),
                    &mut errors,
                    stop_on_first_error,
                )?;
            }

            let value = document.get(field_name);
            match field.kind() {
                FieldKind::Object => {
                    if let (Some(Value::Object(nested)), Some(nested_class)) =
                        (value, field.nested_class())
                    {
                        catch_validation_error(
                            self.validate_nested(
                                nested_class,
                                nested,
                                stop_on_first_error,
                                &field_path,
                                depth,
                            ),
                            &mut errors,
                            stop_on_first_error,
                        )?;
                    }
                }
                FieldKind::List => {
                    if let (Some(Value::Array(elements)), Some(nested_class)) =
                        (value, field.nested_class())
                    {
                        for (i, element) in elements.iter().enumerate() {
                            if let Value::Object(nested) = element {
                                let element_path = format!("{}[{}]", field_path, i);
                                catch_validation_error(
                                    self.validate_nested(
                                        nested_class,
                                        nested,
                                        stop_on_first_error,
                                        &element_path,
                                        depth,
                                    ),
                                    &mut errors,
                                    stop_on_first_error,
                                )?;
                            }
                        }
                    }
                }
                FieldKind::Scalar => {}
            }
        }

        match ValidationReport::from_details(errors) {
            Some(report) => Err(ValidateError::Failed(report)),
            None => Ok(()),
        }
    }

    /// Runs a field's bindings; the first failing one ends the unit.
    fn run_bindings(
        &self,
        document: DocumentRef<'_>,
        field_name: &str,
        field_path: &str,
        bindings: &[BoundValidator],
    ) -> ValidateResult<()> {
        for binding in bindings {
            if !self
                .validators
                .run(&binding.kind, &document, field_name, &binding.param)?
            {
                let message = self
                    .validators
                    .message(&binding.kind, field_name, &binding.param)?;
                return Err(ValidationReport::new(ValidationDetail::new(
                    field_name,
                    field_path,
                    message,
                    binding.kind.as_str(),
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Validates a nested document: all fields, same stop flag.
    fn validate_nested(
        &self,
        class_name: &str,
        values: &Map<String, Value>,
        stop_on_first_error: bool,
        path: &str,
        depth: usize,
    ) -> ValidateResult<()> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(SchemaFault::MaxDepthExceeded(self.max_depth).into());
        }

        let class = self.classes.require(class_name)?;
        let nested = DocumentRef::new(class.name(), values);
        self.validate_fields(
            class,
            nested,
            class.validation_order(),
            stop_on_first_error,
            path,
            depth,
        )
    }
}

/// Routes one unit's outcome: faults always propagate, failures propagate in
/// strict mode and are collected in tolerant mode.
fn catch_validation_error(
    result: ValidateResult<()>,
    errors: &mut Vec<ValidationDetail>,
    stop_on_first_error: bool,
) -> ValidateResult<()> {
    match result {
        Err(ValidateError::Failed(report)) if !stop_on_first_error => {
            errors.extend(report.into_details());
            Ok(())
        }
        other => other,
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClassDef, FieldDef, FieldType};
    use serde_json::json;

    fn registries() -> (ClassRegistry, ValidatorRegistry) {
        let validators = ValidatorRegistry::with_builtins();
        let mut classes = ClassRegistry::new();

        classes
            .register(
                ClassDef::new(
                    "Phone",
                    vec![FieldDef::string("number").validator("length", json!(3))],
                ),
                &validators,
            )
            .unwrap();
        classes
            .register(
                ClassDef::new(
                    "Address",
                    vec![FieldDef::string("city").validator("required", Value::Null)],
                ),
                &validators,
            )
            .unwrap();
        classes
            .register(
                ClassDef::new(
                    "User",
                    vec![
                        FieldDef::string("code").validator("length", json!(5)),
                        FieldDef::string("name")
                            .validator("required", Value::Null)
                            .validator("minLength", json!(2)),
                        FieldDef::object("address", "Address"),
                        FieldDef::list_of("phones", "Phone"),
                        FieldDef::new("scratch", FieldType::Any)
                            .transient()
                            .validator("length", json!(1)),
                    ],
                ),
                &validators,
            )
            .unwrap();

        (classes, validators)
    }

    fn user(values: Value) -> Document {
        Document::from_json("User", values).unwrap()
    }

    fn valid_user() -> Value {
        json!({
            "code": "ABCDE",
            "name": "Ann",
            "address": { "city": "Oslo" },
            "phones": [{ "number": "123" }],
            "scratch": 42
        })
    }

    #[test]
    fn test_valid_document_passes_both_modes() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let doc = user(valid_user());

        assert!(engine.validate(&doc, ()).is_ok());
        assert!(engine.validate(&doc, false).is_ok());
    }

    #[test]
    fn test_length_example() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let mut values = valid_user();
        values["code"] = json!("ab");

        let report = engine.validate(&user(values), ()).unwrap_err().into_report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.message(), "Length of \"code\" has to be 5");
        assert_eq!(report.details()[0].validator, "length");
    }

    #[test]
    fn test_first_failing_binding_ends_the_field() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let mut values = valid_user();
        values["name"] = Value::Null;

        // minLength would fault on null; required fails first
        let report = engine.validate(&user(values), false).unwrap_err().into_report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.details()[0].validator, "required");
    }

    #[test]
    fn test_transient_field_never_checked() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let mut values = valid_user();
        values["scratch"] = json!({ "not": "measurable" });

        assert!(engine.validate(&user(values.clone()), false).is_ok());
        assert!(engine.validate(&user(values), "scratch").is_ok());
    }

    #[test]
    fn test_nested_paths() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let mut values = valid_user();
        values["address"] = json!({});
        values["phones"] = json!([{ "number": "123" }, "skipped", { "number": "1" }]);

        let report = engine.validate(&user(values), false).unwrap_err().into_report().unwrap();
        let paths: Vec<&str> = report.details().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["address.city", "phones[2].number"]);
        assert_eq!(report.details()[1].field, "number");
    }

    #[test]
    fn test_fault_discards_collected_errors() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);
        let mut values = valid_user();
        values["code"] = json!("ab");
        values["name"] = json!(7);

        let err = engine.validate(&user(values), false).unwrap_err();
        assert_eq!(err.as_fault(), Some(&SchemaFault::LengthNotMeasurable));
    }

    #[test]
    fn test_unknown_field_and_class() {
        let (classes, validators) = registries();
        let engine = Engine::new(&classes, &validators);

        let err = engine.validate(&user(valid_user()), "nope").unwrap_err();
        assert_eq!(err.as_fault(), Some(&SchemaFault::unknown_field("User", "nope")));

        let ghost = Document::from_json("Ghost", json!({})).unwrap();
        let err = engine.validate(&ghost, ()).unwrap_err();
        assert_eq!(err.as_fault(), Some(&SchemaFault::UnknownClass("Ghost".into())));
    }

    #[test]
    fn test_max_depth() {
        let validators = ValidatorRegistry::new();
        let mut classes = ClassRegistry::new();
        classes
            .register(
                ClassDef::new("Node", vec![FieldDef::object("child", "Node")]),
                &validators,
            )
            .unwrap();

        let doc = Document::from_json(
            "Node",
            json!({ "child": { "child": { "child": {} } } }),
        )
        .unwrap();

        let engine = Engine::new(&classes, &validators).with_max_depth(2);
        let err = engine.validate(&doc, ()).unwrap_err();
        assert_eq!(err.as_fault(), Some(&SchemaFault::MaxDepthExceeded(2)));

        let engine = engine.with_max_depth(3);
        assert!(engine.validate(&doc, ()).is_ok());
    }

    #[test]
    fn test_make_path() {
        assert_eq!(make_path("", "a"), "a");
        assert_eq!(make_path("a", "b"), "a.b");
        assert_eq!(make_path("a[0]", "b"), "a[0].b");
    }
}
