//! Label domain types.
//!
//! This module contains the request and response shapes used by the label endpoints of the
//! GitHub issues API. Only the fields the labeler needs are modelled; everything else in the
//! GitHub response is ignored during deserialization.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// Represents a label on a repository, issue or pull request.
///
/// # Examples
///
/// ```
/// use github_client::Label;
///
/// let label = Label {
///     name: "Type: Bug".to_string(),
///     color: Some("D73A4A".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,

    /// The colour of the label as six hex digits, without a leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelPayload<'a> {
    pub name: &'a str,

    /// Six hex digits without the leading `#`; GitHub rejects the prefixed form.
    pub color: &'a str,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{issue_number}/labels`.
#[derive(Debug, Clone, Serialize)]
pub struct AddLabelsPayload<'a> {
    pub labels: &'a [String],
}

/// Query parameters for the paginated label listing endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageParameters {
    pub per_page: u8,
    pub page: u32,
}
