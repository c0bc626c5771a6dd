//! Schema fault types
//!
//! A fault is a schema or programming error: a broken class declaration, a
//! malformed validator parameter, or a predicate applied to data it cannot
//! measure. Faults are never folded into a validation report; they always
//! abort the current operation.
//!
//! Error codes:
//! - AERO_UNKNOWN_VALIDATOR (FATAL)
//! - AERO_INVALID_VALIDATOR_PARAM (FATAL)
//! - AERO_DUPLICATE_VALIDATOR (FATAL)
//! - AERO_VALIDATOR_REGISTRY_INSTALLED (FATAL)
//! - AERO_LENGTH_NOT_MEASURABLE (FATAL)
//! - AERO_INCOMPATIBLE_VALUE (FATAL)
//! - AERO_UNKNOWN_FIELD (FATAL)
//! - AERO_UNKNOWN_CLASS (FATAL)
//! - AERO_MAX_DEPTH_EXCEEDED (FATAL)
//! - AERO_CLASS_IMMUTABLE (FATAL)
//! - AERO_MALFORMED_CLASS (FATAL)

use std::fmt;

use thiserror::Error;

/// Severity levels for validation outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Document rejected, caller may fix and retry
    Reject,
    /// Schema or programming error, caller must not continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema and programming faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaFault {
    /// No validator kind registered under this name
    #[error("Validator \"{0}\" is not registered")]
    UnknownValidator(String),

    /// Validator parameter rejected at declaration time
    #[error("{message}")]
    InvalidParam {
        /// Validator kind that rejected the param
        validator: String,
        /// Reason given by the parser
        message: String,
    },

    /// Validator kind registered twice
    #[error("Validator \"{0}\" is already registered")]
    DuplicateValidator(String),

    /// Process-wide registry installed a second time
    #[error("Validator registry is already installed")]
    RegistryInstalled,

    /// Size rule applied to a value without a length
    #[error("Length of the value can not be measured")]
    LengthNotMeasurable,

    /// Predicate applied to a value of the wrong shape
    #[error("Validator \"{validator}\" can not check {actual} values")]
    IncompatibleValue {
        /// Validator kind
        validator: String,
        /// JSON type of the offending value
        actual: String,
    },

    /// Field name not declared on the class
    #[error("Class \"{class}\" has no field \"{field}\"")]
    UnknownField {
        /// Class name
        class: String,
        /// Requested field name
        field: String,
    },

    /// Class name not registered
    #[error("Class \"{0}\" is not registered")]
    UnknownClass(String),

    /// Nested documents deeper than the configured limit
    #[error("Nested validation exceeded the maximum depth of {0}")]
    MaxDepthExceeded(usize),

    /// Class name already registered
    #[error("Class \"{0}\" is already registered and can not be changed")]
    ClassImmutable(String),

    /// Class definition is structurally invalid
    #[error("Malformed class definition '{source_name}': {reason}")]
    MalformedClass {
        /// File path or class name the definition came from
        source_name: String,
        /// What is wrong with it
        reason: String,
    },
}

impl SchemaFault {
    /// Create an invalid param fault
    pub fn invalid_param(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            validator: validator.into(),
            message: message.into(),
        }
    }

    /// Create an incompatible value fault
    pub fn incompatible(validator: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::IncompatibleValue {
            validator: validator.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown field fault
    pub fn unknown_field(class: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            class: class.into(),
            field: field.into(),
        }
    }

    /// Create a malformed class fault
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedClass {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaFault::UnknownValidator(_) => "AERO_UNKNOWN_VALIDATOR",
            SchemaFault::InvalidParam { .. } => "AERO_INVALID_VALIDATOR_PARAM",
            SchemaFault::DuplicateValidator(_) => "AERO_DUPLICATE_VALIDATOR",
            SchemaFault::RegistryInstalled => "AERO_VALIDATOR_REGISTRY_INSTALLED",
            SchemaFault::LengthNotMeasurable => "AERO_LENGTH_NOT_MEASURABLE",
            SchemaFault::IncompatibleValue { .. } => "AERO_INCOMPATIBLE_VALUE",
            SchemaFault::UnknownField { .. } => "AERO_UNKNOWN_FIELD",
            SchemaFault::UnknownClass(_) => "AERO_UNKNOWN_CLASS",
            SchemaFault::MaxDepthExceeded(_) => "AERO_MAX_DEPTH_EXCEEDED",
            SchemaFault::ClassImmutable(_) => "AERO_CLASS_IMMUTABLE",
            SchemaFault::MalformedClass { .. } => "AERO_MALFORMED_CLASS",
        }
    }

    /// Faults are always fatal for the operation that raised them
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }

    /// True for faults raised while declaring classes or validators,
    /// before any document is seen.
    pub fn is_declaration_fault(&self) -> bool {
        matches!(
            self,
            SchemaFault::UnknownValidator(_)
                | SchemaFault::InvalidParam { .. }
                | SchemaFault::DuplicateValidator(_)
                | SchemaFault::RegistryInstalled
                | SchemaFault::ClassImmutable(_)
                | SchemaFault::MalformedClass { .. }
        )
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaFault>;
