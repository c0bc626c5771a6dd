//! Class Loading Tests
//!
//! Class definitions on disk:
//! - Files register in file-name order
//! - A file may hold one class or an array of classes
//! - Bad definitions fail at load time, before any document is validated
//! - Registered classes are immutable

use std::fs;

use aerovalidate::{ClassDef, ClassLoader, ClassRegistry, Document, Engine, FieldDef, SchemaFault, ValidatorRegistry};
use serde_json::json;
use tempfile::TempDir;

fn write_class(dir: &TempDir, file: &str, body: serde_json::Value) {
    fs::write(dir.path().join(file), body.to_string()).unwrap();
}

#[test]
fn test_load_directory_and_validate() {
    let tmp = TempDir::new().unwrap();
    write_class(
        &tmp,
        "a_phone.json",
        json!({
            "name": "Phone",
            "fields": [{ "name": "number", "type": "string" }],
            "validators": { "number": [{ "type": "regexp", "param": "^[0-9]+$" }] }
        }),
    );
    write_class(
        &tmp,
        "b_people.json",
        json!([
            {
                "name": "Person",
                "fields": [
                    { "name": "email", "type": "string", "validators": [{ "type": "email" }] },
                    { "name": "phones", "type": "list", "class": "Phone" }
                ],
                "validation_order": ["phones", "email"]
            }
        ]),
    );
    fs::write(tmp.path().join("README.txt"), "not a class").unwrap();

    let validators = ValidatorRegistry::with_builtins();
    let mut classes = ClassRegistry::new();
    let count = ClassLoader::new(tmp.path())
        .load_all(&mut classes, &validators)
        .unwrap();
    assert_eq!(count, 2);

    let person = classes.get("Person").unwrap();
    assert_eq!(person.validation_order(), ["phones", "email"]);

    let doc = Document::from_json(
        "Person",
        json!({ "email": "nope", "phones": [{ "number": "12a" }] }),
    )
    .unwrap();
    let report = Engine::new(&classes, &validators)
        .validate(&doc, false)
        .unwrap_err()
        .into_report()
        .unwrap();
    let paths: Vec<&str> = report.details().iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, ["phones[0].number", "email"]);
}

#[test]
fn test_missing_directory_loads_nothing() {
    let tmp = TempDir::new().unwrap();
    let validators = ValidatorRegistry::with_builtins();
    let mut classes = ClassRegistry::new();

    let count = ClassLoader::new(tmp.path().join("absent"))
        .load_all(&mut classes, &validators)
        .unwrap();
    assert_eq!(count, 0);
    assert!(classes.is_empty());
}

#[test]
fn test_bad_param_fails_at_load() {
    let tmp = TempDir::new().unwrap();
    write_class(
        &tmp,
        "item.json",
        json!({
            "name": "Item",
            "fields": [{ "name": "code", "type": "string",
                         "validators": [{ "type": "length", "param": "five" }] }]
        }),
    );

    let validators = ValidatorRegistry::with_builtins();
    let mut classes = ClassRegistry::new();
    let err = ClassLoader::new(tmp.path())
        .load_all(&mut classes, &validators)
        .unwrap_err();
    assert_eq!(err.code(), "AERO_INVALID_VALIDATOR_PARAM");
}

#[test]
fn test_malformed_file_fails_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

    let validators = ValidatorRegistry::with_builtins();
    let mut classes = ClassRegistry::new();
    let err = ClassLoader::new(tmp.path())
        .load_all(&mut classes, &validators)
        .unwrap_err();
    assert!(matches!(err, SchemaFault::MalformedClass { .. }));
}

#[test]
fn test_saved_class_reloads_and_is_immutable() {
    let tmp = TempDir::new().unwrap();
    let loader = ClassLoader::new(tmp.path());
    let def = ClassDef::new(
        "Item",
        vec![FieldDef::string("code").validator("length", json!(5))],
    );

    loader.save(&def).unwrap();
    assert!(matches!(loader.save(&def), Err(SchemaFault::ClassImmutable(_))));

    let validators = ValidatorRegistry::with_builtins();
    let mut classes = ClassRegistry::new();
    loader.load_all(&mut classes, &validators).unwrap();
    assert!(classes.contains("Item"));

    let again = classes.register(def, &validators);
    assert!(matches!(again, Err(SchemaFault::ClassImmutable(_))));
}
