//! Named status outputs.
//!
//! A run publishes a few key/value pairs describing what it did. They are meant for people
//! reading the workflow log or later workflow steps, never for control flow, so a failure to
//! write one is logged and otherwise ignored.

use std::io;

use tracing::info;

#[cfg(test)]
#[path = "reporting_tests.rs"]
mod tests;

/// Output naming the run's outcome: `labeled`, `already-labeled` or `skipped`.
///
/// The CLI also writes `failed` here when a run returns an error.
pub const OUTPUT_OUTCOME: &str = "outcome";

/// Output naming the label that was chosen, when there is one.
pub const OUTPUT_LABEL: &str = "label";

/// Human readable description of the outcome.
pub const OUTPUT_MESSAGE: &str = "message";

/// Destination for named status outputs.
pub trait StatusReporter: Send + Sync {
    /// Publishes a single output value.
    fn set_output(&self, name: &str, value: &str) -> io::Result<()>;
}

/// Writes outputs to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl StatusReporter for LogReporter {
    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        info!(output = name, value = value, "Status output");
        Ok(())
    }
}
