//! # Title Labeler Core
//!
//! This crate labels a GitHub issue or pull request according to the bracketed prefix of its
//! title, e.g. `[Bug] crash on start` receives `Type: Bug`.
//!
//! ## Overview
//!
//! A run handles exactly one item:
//! 1. Resolve the item and repository from the webhook payload ([`EventContext`])
//! 2. Classify the title ([`classify`]) and choose a label ([`LabelPolicy`])
//! 3. Make sure the label exists on the repository and on the item ([`LabelApplicator`])
//!
//! [`TitleLabeler`] drives the three steps and publishes status outputs through a
//! [`StatusReporter`].
//!
//! ## Examples
//!
//! ```no_run
//! use github_client::{create_token_client, GitHubClient};
//! use title_labeler_core::{EventPayload, LabelPolicy, LogReporter, TitleLabeler};
//!
//! # async fn example(payload: EventPayload) -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("ghp_example", None)?);
//! let reporter = LogReporter;
//!
//! let labeler = TitleLabeler::new(&client, &reporter, LabelPolicy::default());
//! let outcome = labeler.run(&payload, Some("acme/widgets")).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The GitHub API is reached through the [`github_client::LabelClient`] trait, constructed
//! once by the caller and borrowed by every component.

pub mod classifier;
pub mod color;
pub mod context;
pub mod errors;
pub mod label_applicator;
pub mod orchestrator;
pub mod reporting;

#[cfg(test)]
mod test_support;

pub use classifier::{classify, Classification, LabelPolicy, TypeLabel};
pub use color::LabelColor;
pub use context::{EventContext, EventPayload, ItemKind, ItemPayload, RepositoryId};
pub use errors::{ApplyStep, ContextError, LabelerError, LabelerResult};
pub use label_applicator::{ApplyOutcome, LabelApplicator, REPOSITORY_LABEL_PAGE_SIZE};
pub use orchestrator::{RunOutcome, SkipReason, TitleLabeler};
pub use reporting::{LogReporter, StatusReporter, OUTPUT_LABEL, OUTPUT_MESSAGE, OUTPUT_OUTCOME};
