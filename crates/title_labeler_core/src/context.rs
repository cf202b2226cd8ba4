//! Invocation context.
//!
//! GitHub Actions writes the triggering webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. Only the parts needed to label an item are modelled here; the payload
//! is resolved into an [`EventContext`] before any API call is made.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ContextError;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// The kind of item being labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Issue,
    PullRequest,
}

impl ItemKind {
    /// The form used in status outputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => f.write_str("issue"),
            Self::PullRequest => f.write_str("pull request"),
        }
    }
}

/// The subset of an `issues` or `pull_request` webhook payload read by the labeler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<ItemPayload>,

    #[serde(default)]
    pub issue: Option<ItemPayload>,

    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

/// An issue or pull request record from the payload.
///
/// The title is kept as raw JSON so that a non-string title can be told apart from a
/// missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub title: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub owner: OwnerPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
}

/// Owner and name of the repository holding the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub repo: String,
}

impl RepositoryId {
    /// Parses the `owner/name` form used by `GITHUB_REPOSITORY`.
    pub fn parse(full_name: &str) -> Result<Self, ContextError> {
        match full_name.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(ContextError::InvalidRepository(full_name.to_string())),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A resolved labeling target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub repository: RepositoryId,
    pub kind: ItemKind,
    pub number: u64,

    /// `None` when the payload carried a title that is not a string.
    pub title: Option<String>,
}

impl EventContext {
    /// Resolves the payload into a labeling target.
    ///
    /// A pull request takes precedence over an issue. `repository` is the `owner/name` string
    /// from the environment; when absent the payload's own repository record is used.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] when the payload has neither item, when the item lacks a
    /// number or title, or when the repository cannot be determined. A title that is present
    /// but not a string is not an error.
    pub fn resolve(payload: &EventPayload, repository: Option<&str>) -> Result<Self, ContextError> {
        let (kind, item) = if let Some(pr) = &payload.pull_request {
            (ItemKind::PullRequest, pr)
        } else if let Some(issue) = &payload.issue {
            (ItemKind::Issue, issue)
        } else {
            return Err(ContextError::NoItem);
        };

        let number = match item.number {
            Some(n) if n > 0 => n,
            _ => return Err(ContextError::MissingNumber(kind)),
        };

        let title = match &item.title {
            None | Some(Value::Null) => return Err(ContextError::MissingTitle(kind)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(ContextError::MissingTitle(kind))
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => None,
        };

        let repository = match repository.map(str::trim).filter(|r| !r.is_empty()) {
            Some(full_name) => RepositoryId::parse(full_name)?,
            None => payload
                .repository
                .as_ref()
                .map(|r| RepositoryId {
                    owner: r.owner.login.clone(),
                    repo: r.name.clone(),
                })
                .ok_or(ContextError::MissingRepository)?,
        };

        Ok(Self {
            repository,
            kind,
            number,
            title,
        })
    }
}
