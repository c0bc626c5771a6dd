//! In-memory class registry
//!
//! Classes are registered once and never change afterwards. Registration is
//! declaration time: structure checks and validator param parsing happen
//! here, before any document is validated.

use std::collections::HashMap;

use super::errors::{SchemaFault, SchemaResult};
use super::types::{Class, ClassDef};
use crate::observability::{Event, Logger};
use crate::validators::ValidatorRegistry;

/// Registry of resolved classes, keyed by class name.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Class>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class definition.
    ///
    /// # Errors
    ///
    /// - `ClassImmutable` if a class with this name exists
    /// - `MalformedClass` if the definition's structure is invalid
    /// - `UnknownValidator` / `InvalidParam` if a binding can not be resolved
    pub fn register(
        &mut self,
        definition: ClassDef,
        validators: &ValidatorRegistry,
    ) -> SchemaResult<&Class> {
        if self.classes.contains_key(&definition.name) {
            return Err(SchemaFault::ClassImmutable(definition.name));
        }

        let class = definition.resolve(validators)?;
        let name = class.name().to_string();
        let field_count = class.validation_order().len().to_string();
        Logger::trace(
            Event::ClassRegistered.as_str(),
            &[("class", name.as_str()), ("fields", field_count.as_str())],
        );

        Ok(self.classes.entry(name).or_insert(class))
    }

    pub fn get(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    /// Gets a class or fails with `UnknownClass`.
    pub fn require(&self, name: &str) -> SchemaResult<&Class> {
        self.get(name)
            .ok_or_else(|| SchemaFault::UnknownClass(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Returns all classes sorted by name.
    pub fn classes(&self) -> Vec<&Class> {
        let mut classes: Vec<&Class> = self.classes.values().collect();
        classes.sort_by(|a, b| a.name().cmp(b.name()));
        classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
