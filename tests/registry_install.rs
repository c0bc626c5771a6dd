//! Process-wide validator registry lifecycle
//!
//! Kept in its own test binary: the registry is installed once per process.

use aerovalidate::validators::{self, ValidatorRegistry};
use aerovalidate::{SchemaFault, ValidatorDefinition};

#[test]
fn test_install_once() {
    let mut registry = ValidatorRegistry::with_builtins();
    registry
        .register(ValidatorDefinition::new(
            "always",
            |_, _| Ok(true),
            |name, _| format!("\"{}\" never fails", name),
        ))
        .unwrap();

    let installed = validators::install(registry).unwrap();
    assert!(installed.contains("always"));
    assert!(validators::global().contains("always"));

    let second = validators::install(ValidatorRegistry::with_builtins());
    assert!(matches!(second, Err(SchemaFault::RegistryInstalled)));
    assert!(validators::global().contains("always"));
}
