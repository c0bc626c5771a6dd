//! Observable events
//!
//! Events are explicit and typed; their string forms are what appears in
//! the `event` key of each log line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Registries
    /// Validator kind registered
    ValidatorRegistered,
    /// Process-wide validator registry installed
    RegistryInstalled,
    /// Class registered
    ClassRegistered,
    /// Class directory loaded
    ClassesLoaded,

    // Validation
    /// Validation run aborted by a schema fault
    ValidationFault,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ValidatorRegistered => "VALIDATOR_REGISTERED",
            Event::RegistryInstalled => "VALIDATOR_REGISTRY_INSTALLED",
            Event::ClassRegistered => "CLASS_REGISTERED",
            Event::ClassesLoaded => "CLASSES_LOADED",
            Event::ValidationFault => "VALIDATION_FAULT",
        }
    }

    /// Returns true if this event indicates a fault
    pub fn is_fault(&self) -> bool {
        matches!(self, Event::ValidationFault)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
