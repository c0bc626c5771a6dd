//! Observability subsystem
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed events for registry and validation lifecycle
//! - Scope-based outcome logging
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation outcomes
//! 3. No async or background threads
//! 4. Deterministic field ordering
//!
//! # Usage
//!
//! ```ignore
//! use aerovalidate::observability::{Event, Logger, ObservationScope};
//!
//! Logger::info(Event::ClassesLoaded.as_str(), &[("count", "3")]);
//!
//! let scope = ObservationScope::new("VALIDATION");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event at INFO, or ERROR for fault events
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fault() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
