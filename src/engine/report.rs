//! Validation reports and the engine's error type
//!
//! Error codes:
//! - AERO_VALIDATION_FAILED (REJECT): one or more field checks failed
//! - every `SchemaFault` code (FATAL)

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{SchemaFault, Severity};

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Field name on the class that declares it
    pub field: String,
    /// Location from the root document (e.g. "phones[1].number")
    pub path: String,
    /// Message built by the validator kind
    pub message: String,
    /// Validator kind that failed
    pub validator: String,
}

impl ValidationDetail {
    pub fn new(
        field: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        validator: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            message: message.into(),
            validator: validator.into(),
        }
    }
}

impl fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.validator, self.message)
    }
}

/// Ordered, non-empty list of failed checks.
///
/// The report's message is its first detail's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    message: String,
    details: Vec<ValidationDetail>,
}

impl ValidationReport {
    pub const CODE: &'static str = "AERO_VALIDATION_FAILED";

    /// Creates a report headed by `first`.
    pub fn new(first: ValidationDetail) -> Self {
        Self {
            message: first.message.clone(),
            details: vec![first],
        }
    }

    /// Creates a report from collected details, `None` if there are none.
    pub fn from_details(details: Vec<ValidationDetail>) -> Option<Self> {
        let message = details.first()?.message.clone();
        Some(Self { message, details })
    }

    /// Headline message (the first detail's message)
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[ValidationDetail] {
        &self.details
    }

    pub fn into_details(self) -> Vec<ValidationDetail> {
        self.details
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Never true for a constructed report.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Error returned by [`Engine::validate`](super::Engine::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    /// The document failed one or more checks
    #[error("{0}")]
    Failed(ValidationReport),

    /// Schema or programming fault; never collected
    #[error(transparent)]
    Fault(#[from] SchemaFault),
}

impl ValidateError {
    /// True when this is a validation failure rather than a fault.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, ValidateError::Failed(_))
    }

    pub fn as_report(&self) -> Option<&ValidationReport> {
        match self {
            ValidateError::Failed(report) => Some(report),
            ValidateError::Fault(_) => None,
        }
    }

    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            ValidateError::Failed(report) => Some(report),
            ValidateError::Fault(_) => None,
        }
    }

    pub fn as_fault(&self) -> Option<&SchemaFault> {
        match self {
            ValidateError::Failed(_) => None,
            ValidateError::Fault(fault) => Some(fault),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidateError::Failed(_) => ValidationReport::CODE,
            ValidateError::Fault(fault) => fault.code(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ValidateError::Failed(report) => report.severity(),
            ValidateError::Fault(fault) => fault.severity(),
        }
    }
}

impl From<ValidationReport> for ValidateError {
    fn from(report: ValidationReport) -> Self {
        ValidateError::Failed(report)
    }
}

/// Result type for validation
pub type ValidateResult<T> = Result<T, ValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(field: &str, message: &str) -> ValidationDetail {
        ValidationDetail::new(field, field, message, "length")
    }

    #[test]
    fn test_report_headline_is_first_message() {
        let report = ValidationReport::from_details(vec![
            detail("a", "first"),
            detail("b", "second"),
        ])
        .unwrap();

        assert_eq!(report.message(), "first");
        assert_eq!(report.to_string(), "first");
        assert_eq!(report.len(), 2);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_empty_details_make_no_report() {
        assert!(ValidationReport::from_details(Vec::new()).is_none());
    }

    #[test]
    fn test_failure_predicate() {
        let failed = ValidateError::from(ValidationReport::new(detail("a", "bad")));
        assert!(failed.is_validation_failure());
        assert_eq!(failed.code(), "AERO_VALIDATION_FAILED");
        assert_eq!(failed.severity(), Severity::Reject);
        assert_eq!(failed.as_report().unwrap().details()[0].field, "a");

        let fault = ValidateError::from(SchemaFault::LengthNotMeasurable);
        assert!(!fault.is_validation_failure());
        assert!(fault.as_report().is_none());
        assert_eq!(fault.code(), "AERO_LENGTH_NOT_MEASURABLE");
        assert_eq!(fault.to_string(), "Length of the value can not be measured");
        assert_eq!(fault.severity(), Severity::Fatal);
    }

    #[test]
    fn test_detail_display() {
        let d = ValidationDetail::new("city", "address.city", "\"city\" is required", "required");
        assert_eq!(d.to_string(), "address.city [required]: \"city\" is required");
    }
}
