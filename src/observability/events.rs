//! Observable events
//!
//! Events are explicit and typed. Query evaluation emits none of them.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Table construction
    /// Table built and validated
    TableLoaded,
    /// Table construction rejected
    TableRejected,

    // Table files
    /// Table file read
    FileLoaded,
    /// Table file written
    FileSaved,
    /// Table file unreadable or corrupted
    FileRejected,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Commands
    /// Command started
    CommandBegin,
    /// Command finished successfully
    CommandComplete,
    /// Command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TableLoaded => "TABLE_LOADED",
            Event::TableRejected => "TABLE_REJECTED",
            Event::FileLoaded => "TABLE_FILE_LOADED",
            Event::FileSaved => "TABLE_FILE_SAVED",
            Event::FileRejected => "TABLE_FILE_REJECTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CommandBegin => "COMMAND_BEGIN",
            Event::CommandComplete => "COMMAND_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TableRejected | Event::FileRejected => Severity::Warn,
            Event::CommandFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
