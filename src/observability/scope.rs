//! ObservationScope for start/outcome logging around one operation
//!
//! - `{name}_BEGIN` on creation (TRACE)
//! - `{name}_COMPLETE` on success (INFO)
//! - `{name}_REJECTED` when the input is refused (WARN)
//! - `{name}_FAILED` on a fault (ERROR)
//! - `{name}_INCOMPLETE` if dropped without an outcome (WARN)
//!
//! Every outcome line carries `elapsed_us`.

use std::cell::Cell;
use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs its start and outcome
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::with_fields("VALIDATION", &[("class", "User")]);
/// // ... do work ...
/// scope.complete(); // logs VALIDATION_COMPLETE
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields repeated on every line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::trace(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.finish(Severity::Info, "COMPLETE", &[]);
    }

    /// Mark the scope's input as rejected
    pub fn reject(self, extra_fields: &[(&str, &str)]) {
        self.finish(Severity::Warn, "REJECTED", extra_fields);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(self, reason: &str) {
        self.finish(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn finish(self, severity: Severity, outcome: &str, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        if !Logger::enabled(severity) {
            return;
        }

        let elapsed = self.started.elapsed().as_micros().to_string();
        let mut all_fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_us", elapsed.as_str()));

        Logger::log(severity, &format!("{}_{}", self.name, outcome), &all_fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let event = format!("{}_INCOMPLETE", self.name);
            Logger::warn(&event, &[("reason", "scope dropped without outcome")]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_outcomes_mark_completed() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
        scope.complete();

        let scope = ObservationScope::with_fields("TEST", &[("class", "User")]);
        scope.reject(&[("details", "2")]);

        let scope = ObservationScope::new("TEST");
        scope.fail("boom");
    }
}
