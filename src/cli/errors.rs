//! CLI-specific error types
//!
//! All CLI errors are FATAL: main prints them to stderr and exits 1.

use std::fmt;
use std::io;

use crate::engine::{ValidateError, ValidationReport};
use crate::schema::SchemaFault;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Class definitions or a validation run hit a schema fault
    ValidationFault,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "AERO_CLI_CONFIG_ERROR",
            Self::IoError => "AERO_CLI_IO_ERROR",
            Self::ValidationFault => "AERO_CLI_VALIDATION_FAULT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Schema fault, keeping the fault's own code in the message
    pub fn fault(fault: &SchemaFault) -> Self {
        Self::new(
            CliErrorCode::ValidationFault,
            format!("{}: {}", fault.code(), fault),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaFault> for CliError {
    fn from(fault: SchemaFault) -> Self {
        Self::fault(&fault)
    }
}

impl From<ValidateError> for CliError {
    fn from(e: ValidateError) -> Self {
        match e {
            ValidateError::Fault(fault) => Self::fault(&fault),
            ValidateError::Failed(report) => Self::new(
                CliErrorCode::ValidationFault,
                format!("{}: {}", ValidationReport::CODE, report),
            ),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
