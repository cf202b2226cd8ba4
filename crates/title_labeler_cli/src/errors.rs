use std::io;
use std::path::PathBuf;

use thiserror::Error;
use title_labeler_core::LabelerError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the title labeler CLI.
///
/// Each variant names the stage that failed so that the workflow log shows whether the
/// configuration, the event context or the label application went wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, e.g. a missing access token or an unreadable policy file.
    ///
    /// Reported before any GitHub API call is made.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read the event payload file.
    #[error("Failed to resolve event context: could not read {path:?}: {source}")]
    LoadEvent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The event payload is not valid JSON or has unexpected field types.
    #[error("Failed to resolve event context: invalid event payload: {0}")]
    ParseEvent(serde_json::Error),

    /// The GitHub client could not be constructed.
    #[error("Configuration error: {0}")]
    Client(github_client::Error),

    /// The labeling run failed.
    #[error(transparent)]
    Labeler(#[from] LabelerError),
}
