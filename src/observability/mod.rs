//! Observability subsystem for tabquery
//!
//! Structured JSON-lines logging of typed lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No async or background threads
//! 4. Silent by default: only WARN and above reach the output until
//!    `Logger::set_min_severity` lowers the threshold
//! 5. Every line goes to stderr, whatever its severity
//!
//! # Usage
//!
//! ```ignore
//! use tabquery::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::QueryBegin, &[("predicates", "2")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let name = event.as_str();
    match event.severity() {
        Severity::Trace => Logger::trace(name, fields),
        Severity::Info => Logger::info(name, fields),
        Severity::Warn => Logger::warn(name, fields),
        Severity::Error => Logger::error(name, fields),
        Severity::Fatal => Logger::fatal(name, fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::QueryBegin);
        log_event(Event::QueryComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("path", "/tmp/query.json")]);
    }
}
