//! Observability subsystem
//!
//! Structured JSON-lines logging with typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No async or background threads
//! 3. Deterministic output (key order is fixed)
//! 4. Query evaluation never logs; table construction, file I/O and
//!    commands do
//!
//! # Usage
//!
//! ```ignore
//! use txnq::observability::{log_event_with_fields, Event, CommandScope};
//!
//! log_event_with_fields(Event::TableLoaded, &[("rows", "8")]);
//!
//! let scope = CommandScope::begin("summary");
//! // ... do work ...
//! scope.complete();
//! ```

use std::io::{self, Write};

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::CommandScope;

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if Logger::enabled(event.severity()) {
        write_event(event, fields, &mut io::stderr());
    }
}

fn write_event<W: Write>(event: Event, fields: &[(&str, &str)], writer: &mut W) {
    Logger::log_to_writer(event.severity(), event.as_str(), fields, writer);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(event: Event, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        write_event(event, fields, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_log_event() {
        let line = written(Event::ConfigLoaded, &[]);
        assert_eq!(line, "{\"event\":\"CONFIG_LOADED\",\"severity\":\"INFO\"}\n");
    }

    #[test]
    fn test_log_event_with_fields() {
        let line = written(Event::FileSaved, &[("rows", "8"), ("path", "/tmp/t.csv")]);
        assert!(line.starts_with("{\"event\":\"TABLE_FILE_SAVED\",\"severity\":\"INFO\","));
        assert!(line.find("\"path\"").unwrap() < line.find("\"rows\"").unwrap());

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["path"], "/tmp/t.csv");
        assert_eq!(parsed["rows"], "8");
    }

    #[test]
    fn test_rejections_log_at_their_own_severity() {
        let line = written(Event::FileRejected, &[("reason", "checksum")]);
        assert!(line.contains("\"severity\":\"WARN\""));
        let line = written(Event::CommandFailed, &[]);
        assert!(line.contains("\"severity\":\"ERROR\""));
    }
}
