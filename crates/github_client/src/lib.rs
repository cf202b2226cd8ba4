//! Crate for interacting with the label endpoints of the GitHub REST API.
//!
//! This crate provides a client for making token authenticated requests to GitHub. The
//! operations needed to label issues and pull requests are exposed through the
//! [`LabelClient`] trait so that callers can substitute a test double.

use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod label;
pub use label::Label;
use label::{AddLabelsPayload, CreateLabelPayload, PageParameters};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The largest page size accepted by the GitHub REST API.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Upper bound on the pages read from a label listing.
pub const MAX_LABEL_PAGES: u32 = 10;

/// A client for interacting with the GitHub API, authenticated with an access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an already authenticated `Octocrab` instance.
    ///
    /// The client is meant to be constructed once per invocation and shared by reference.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every page of a label listing endpoint and returns the label names.
    ///
    /// Pages are requested in order until GitHub returns a page shorter than `per_page`, or
    /// until [`MAX_LABEL_PAGES`] pages have been read.
    async fn list_label_names(&self, route: &str, per_page: u8) -> Result<Vec<String>, Error> {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParameters { per_page, page };

            debug!(route = route, page = page, "Requesting label page");
            let result: OctocrabResult<Vec<Label>> = self.client.get(route, Some(&params)).await;
            let labels = result.map_err(|e| map_octocrab_error("Failed to list labels", e))?;

            let count = labels.len();
            names.extend(labels.into_iter().map(|l| l.name));

            if count < per_page as usize {
                break;
            }

            if page >= MAX_LABEL_PAGES {
                warn!(
                    route = route,
                    pages = page,
                    count = names.len(),
                    "Stopped listing labels at the page limit"
                );
                break;
            }

            page += 1;
        }

        Ok(names)
    }
}

/// Trait for the label operations performed against a repository.
///
/// Issues and pull requests share the issues API for labels, so `number` may refer to either.
#[async_trait]
pub trait LabelClient: Send + Sync {
    /// Lists the names of the labels currently attached to an issue or pull request.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the item does not exist, or another variant if the call fails.
    async fn list_item_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<String>, Error>;

    /// Lists the names of every label defined on the repository.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `per_page` - Page size used while paging through the labels. Capped at [`MAX_PAGE_SIZE`].
    async fn list_repository_labels(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> Result<Vec<String>, Error>;

    /// Creates a label on the repository.
    ///
    /// # Arguments
    ///
    /// * `name` - The label name.
    /// * `color` - Six hex digits without a leading `#`.
    ///
    /// # Errors
    /// Returns `Error::LabelAlreadyExists` if a label with the same name is already defined.
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> Result<(), Error>;

    /// Adds labels to an issue or pull request.
    ///
    /// Adding a label the item already carries is not an error.
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}

#[async_trait]
impl LabelClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    async fn list_item_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<String>, Error> {
        let route = format!("/repos/{}/{}/issues/{}/labels", owner, repo, number);
        let names = self.list_label_names(&route, MAX_PAGE_SIZE).await?;

        debug!(count = names.len(), "Retrieved labels for item");
        Ok(names)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_repository_labels(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> Result<Vec<String>, Error> {
        let route = format!("/repos/{}/{}/labels", owner, repo);
        let names = self.list_label_names(&route, per_page).await?;

        debug!(count = names.len(), "Retrieved labels for repository");
        Ok(names)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, label = %name))]
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> Result<(), Error> {
        let route = format!("/repos/{}/{}/labels", owner, repo);
        let payload = CreateLabelPayload { name, color };

        let response: OctocrabResult<Label> = self.client.post(route, Some(&payload)).await;
        match response {
            Ok(label) => {
                info!(label = label.name, color = color, "Created repository label");
                Ok(())
            }
            Err(e) if is_already_exists(&e) => Err(Error::LabelAlreadyExists(name.to_string())),
            Err(e) => Err(map_octocrab_error("Failed to create label", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, number = number))]
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        let route = format!("/repos/{}/{}/issues/{}/labels", owner, repo, number);
        let payload = AddLabelsPayload { labels };

        let response: OctocrabResult<Vec<Label>> = self.client.post(route, Some(&payload)).await;
        match response {
            Ok(current) => {
                info!(
                    added = ?labels,
                    total = current.len(),
                    "Added labels to item"
                );
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to add labels", e)),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal or workflow access token.
///
/// Automatic retries are disabled, so every request is sent exactly once.
///
/// # Arguments
///
/// * `token` - The access token, typically the workflow's `GITHUB_TOKEN`.
/// * `base_uri` - Optional API root, e.g. a GitHub Enterprise Server `https://host/api/v3`.
///
/// # Errors
/// Returns `Error::AuthError` if the base URI is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, Error};
///
/// fn main() -> Result<(), Error> {
///     let octocrab = create_token_client("ghp_example", None)?;
///     let client = GitHubClient::new(octocrab);
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    // One attempt per request.
    let mut builder = Octocrab::builder()
        .personal_token(token.to_string())
        .add_retry_config(RetryConfig::None);

    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri.to_string()).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid GitHub API base URI '{}': {}", uri, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with access token");
        Error::AuthError(format!("Failed to build GitHub client: {}", e))
    })
}

/// Returns true when GitHub rejected a label create because the name is already taken.
fn is_already_exists(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            source.status_code.as_u16() == 422
                && source.errors.as_ref().is_some_and(|errors| {
                    errors
                        .iter()
                        .any(|err| err.get("code").and_then(|c| c.as_str()) == Some("already_exists"))
                })
        }
        _ => false,
    }
}

/// Logs an octocrab failure and converts it into a crate [`Error`].
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let status = source.status_code.as_u16();
            error!(
                status = status,
                error_message = source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            match status {
                401 => Error::AuthError(source.message),
                403 | 429 if source.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                403 => Error::AuthError(source.message),
                404 => Error::NotFound,
                _ => Error::ApiError(format!("{} ({})", source.message, status)),
            }
        }
        octocrab::Error::Serde { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to deserialize the response.",
                message
            );
            Error::Deserialization(source)
        }
        octocrab::Error::Json { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response was not in the expected format.",
                message
            );
            Error::InvalidResponse
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::ApiError(e.to_string())
        }
    }
}
