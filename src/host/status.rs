//! Transient status messages shown while a command waits on the user.

use owo_colors::OwoColorize;

pub trait StatusLine {
    fn set(&self, message: &str);
    fn clear(&self);
}

/// Writes status messages to stderr so stdout stays clean for piping.
pub struct TerminalStatus {
    color: bool,
}

impl TerminalStatus {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl StatusLine for TerminalStatus {
    fn set(&self, message: &str) {
        tracing::debug!(message, "Status set");
        if self.color {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }

    fn clear(&self) {
        tracing::debug!("Status cleared");
    }
}
