//! Validator registry
//!
//! Maps validator kind names to their definitions. A registry is built and
//! populated at startup, then either borrowed by the engine directly or
//! installed once as the process-wide registry. The installed registry is
//! only reachable through a shared reference, so it can not change while
//! validation runs.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde_json::Value;

use super::definition::ValidatorDefinition;
use crate::document::DocumentRef;
use crate::observability::{Event, Logger};
use crate::schema::{SchemaFault, SchemaResult};

static GLOBAL: OnceCell<ValidatorRegistry> = OnceCell::new();

/// Registry of validator kinds.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    definitions: HashMap<String, ValidatorDefinition>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in validator kind.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for definition in super::builtins() {
            // Built-in names are distinct
            let name = definition.name().to_string();
            registry.definitions.insert(name, definition);
        }
        registry
    }

    /// Registers a validator kind.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateValidator` if the name is taken.
    pub fn register(&mut self, definition: ValidatorDefinition) -> SchemaResult<()> {
        if self.definitions.contains_key(definition.name()) {
            return Err(SchemaFault::DuplicateValidator(definition.name().to_string()));
        }

        Logger::trace(
            Event::ValidatorRegistered.as_str(),
            &[("validator", definition.name())],
        );
        self.definitions
            .insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Gets a definition by kind name.
    pub fn get(&self, kind: &str) -> Option<&ValidatorDefinition> {
        self.definitions.get(kind)
    }

    /// Checks if a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.definitions.contains_key(kind)
    }

    /// Returns registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Parses a raw param for `kind` at declaration time.
    ///
    /// # Errors
    ///
    /// - `UnknownValidator` if `kind` is not registered
    /// - `InvalidParam` if the kind's parser rejects `raw`
    pub fn resolve_param(&self, kind: &str, raw: &Value) -> SchemaResult<Value> {
        self.lookup(kind)?.parse_param(raw)
    }

    /// Runs `kind` against the current value of `field`.
    ///
    /// A missing field is checked as `null`. Faults raised by the predicate
    /// are returned as-is.
    pub fn run(
        &self,
        kind: &str,
        document: &DocumentRef<'_>,
        field: &str,
        param: &Value,
    ) -> SchemaResult<bool> {
        static NULL: Value = Value::Null;

        let definition = self.lookup(kind)?;
        let value = document.get(field).unwrap_or(&NULL);
        definition.is_valid(value, param)
    }

    /// Builds the failure message of `kind` for `field`.
    pub fn message(&self, kind: &str, field: &str, param: &Value) -> SchemaResult<String> {
        Ok(self.lookup(kind)?.resolve_error(field, param))
    }

    fn lookup(&self, kind: &str) -> SchemaResult<&ValidatorDefinition> {
        self.definitions
            .get(kind)
            .ok_or_else(|| SchemaFault::UnknownValidator(kind.to_string()))
    }
}

/// Installs `registry` as the process-wide registry.
///
/// # Errors
///
/// Returns `RegistryInstalled` if a registry was already installed, either
/// explicitly or lazily through [`global`].
pub fn install(registry: ValidatorRegistry) -> SchemaResult<&'static ValidatorRegistry> {
    let count = registry.len().to_string();
    GLOBAL
        .set(registry)
        .map_err(|_| SchemaFault::RegistryInstalled)?;
    Logger::info(
        Event::RegistryInstalled.as_str(),
        &[("validators", count.as_str())],
    );
    Ok(global())
}

/// Returns the process-wide registry, installing the built-ins if nothing
/// was installed yet.
pub fn global() -> &'static ValidatorRegistry {
    GLOBAL.get_or_init(ValidatorRegistry::with_builtins)
}
