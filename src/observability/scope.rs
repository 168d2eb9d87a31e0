//! Command scope for begin/complete/failed logging

use std::cell::Cell;
use std::time::Instant;

use super::events::Event;
use super::logger::Logger;

/// Logs `COMMAND_BEGIN` on creation and exactly one of `COMMAND_COMPLETE`
/// or `COMMAND_FAILED` when it ends. Dropping an unfinished scope logs a
/// failure.
pub struct CommandScope<'a> {
    command: &'a str,
    started: Instant,
    finished: Cell<bool>,
}

impl<'a> CommandScope<'a> {
    pub fn begin(command: &'a str) -> Self {
        log(Event::CommandBegin, &[("command", command)]);
        Self {
            command,
            started: Instant::now(),
            finished: Cell::new(false),
        }
    }

    /// Elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    pub fn complete(self) {
        self.finished.set(true);
        let elapsed = self.elapsed_ms();
        log(
            Event::CommandComplete,
            &[("command", self.command), ("duration_ms", &elapsed)],
        );
    }

    pub fn fail(self, code: &str, reason: &str) {
        self.finished.set(true);
        let elapsed = self.elapsed_ms();
        log(
            Event::CommandFailed,
            &[
                ("code", code),
                ("command", self.command),
                ("duration_ms", &elapsed),
                ("reason", reason),
            ],
        );
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

impl Drop for CommandScope<'_> {
    fn drop(&mut self) {
        if !self.finished.get() {
            log(
                Event::CommandFailed,
                &[("command", self.command), ("reason", "scope dropped without completion")],
            );
        }
    }
}

fn log(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
