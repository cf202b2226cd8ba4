//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. The variants carry enough context for callers to report
//! which request failed and why, without exposing the access token.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.create_label("owner", "repo", "Type: Bug", "D73A4A").await {
///     Ok(()) => println!("Label created"),
///     Err(Error::LabelAlreadyExists(name)) => println!("{name} already exists"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub API request failed for a reason not covered by a more specific variant.
    ///
    /// The contained string is the message returned by GitHub, or the transport error.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The access token is invalid, expired or revoked
    /// - The token lacks the `issues` / `pull_requests` write permission
    /// - The client could not be constructed
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// A label with the given name is already defined on the repository.
    ///
    /// GitHub answers a duplicate label create with `422 Unprocessable Entity`. This
    /// typically happens when two workflow runs race to create the same label.
    #[error("Label already exists: {0}")]
    LabelAlreadyExists(String),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the repository, issue or pull request does not exist or
    /// is not accessible with the current token.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
