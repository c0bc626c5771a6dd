//! Validation engine
//!
//! Runs the validators bound to a document's fields, recurses into nested
//! documents, and either stops at the first failure or collects them all.

mod options;
mod report;
mod validator;

pub use options::{FieldSelector, ValidateOptions};
pub use report::{ValidateError, ValidateResult, ValidationDetail, ValidationReport};
pub use validator::{Engine, DEFAULT_MAX_DEPTH};
