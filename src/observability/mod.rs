//! Observability subsystem for rowlayout
//!
//! Structured JSON logging of typed events. Logging is read-only: it never
//! changes the outcome of column construction or schema compilation.
//!
//! # Usage
//!
//! ```ignore
//! use rowlayout::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::SchemaCompiled, &[("columns", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture;

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_logged_at_its_severity() {
        let ((), lines) = capture::lines_logged_by(|| {
            log_event_with_fields(Event::OptionConflict, &[("name", "_v_names")]);
        });
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["event"], "OPTION_CONFLICT");
        assert_eq!(parsed["severity"], "WARN");
    }
}
