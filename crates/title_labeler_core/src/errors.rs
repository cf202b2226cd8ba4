use std::fmt;

use thiserror::Error;

use crate::context::ItemKind;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias used throughout the labeler.
pub type LabelerResult<T> = Result<T, LabelerError>;

/// Errors that stop a labeling run.
///
/// A title without a recognised prefix is not an error; it ends the run with
/// [`crate::RunOutcome::Skipped`].
#[derive(Error, Debug)]
pub enum LabelerError {
    /// The event payload did not describe a usable issue or pull request.
    #[error("Failed to resolve event context: {0}")]
    Context(#[from] ContextError),

    /// A GitHub API call made while applying the label failed.
    #[error("Failed to apply label '{label}' to #{number}: could not {step}: {source}")]
    Apply {
        step: ApplyStep,
        label: String,
        number: u64,
        #[source]
        source: github_client::Error,
    },
}

/// Problems found while reading the invocation context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Could not get issue or pull request from context")]
    NoItem,

    #[error("Could not get {0} number from context")]
    MissingNumber(ItemKind),

    #[error("Could not get {0} title from context")]
    MissingTitle(ItemKind),

    #[error("Could not determine the repository owner and name")]
    MissingRepository,

    #[error("Invalid repository '{0}', expected 'owner/name'")]
    InvalidRepository(String),
}

/// The label application step that was running when a GitHub call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    ListItemLabels,
    ListRepositoryLabels,
    CreateLabel,
    AddLabel,
}

impl fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ListItemLabels => "list the labels on the item",
            Self::ListRepositoryLabels => "list the repository labels",
            Self::CreateLabel => "create the repository label",
            Self::AddLabel => "add the label to the item",
        };
        f.write_str(text)
    }
}
