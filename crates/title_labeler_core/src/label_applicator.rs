//! Applies a single label to an issue or pull request.
//!
//! This module provides the [`LabelApplicator`] component, which makes sure a label exists on
//! the repository and is attached to the item. It performs one attempt per GitHub call and
//! never retries.

use github_client::{LabelClient, MAX_PAGE_SIZE};
use tracing::{debug, info, instrument, warn};

use crate::color::LabelColor;
use crate::context::RepositoryId;
use crate::errors::{ApplyStep, LabelerError, LabelerResult};

#[cfg(test)]
#[path = "label_applicator_tests.rs"]
mod tests;

/// Page size used when listing the repository's labels.
pub const REPOSITORY_LABEL_PAGE_SIZE: u8 = MAX_PAGE_SIZE;

/// What [`LabelApplicator::ensure_label`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The item already carried the label; no writes were made.
    AlreadyPresent,

    /// The label was added to the item. `label_created` is true when this run also created
    /// the label on the repository.
    Applied { label_created: bool },
}

/// Ensures a label exists on a repository and is attached to an item.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient};
/// use title_labeler_core::{LabelApplicator, RepositoryId};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::new(create_token_client("ghp_example", None)?);
/// let repository = RepositoryId::parse("acme/widgets")?;
///
/// let applicator = LabelApplicator::new(&client, &repository);
/// applicator.ensure_label(42, "Type: Bug").await?;
/// # Ok(())
/// # }
/// ```
pub struct LabelApplicator<'a> {
    client: &'a dyn LabelClient,
    repository: &'a RepositoryId,
}

impl<'a> LabelApplicator<'a> {
    pub fn new(client: &'a dyn LabelClient, repository: &'a RepositoryId) -> Self {
        Self { client, repository }
    }

    /// Ensures `label` is attached to item `number`.
    ///
    /// # Behavior
    ///
    /// 1. Lists the item's labels and returns [`ApplyOutcome::AlreadyPresent`] if the label
    ///    is among them.
    /// 2. Lists the repository's labels.
    /// 3. Creates the label with a random colour when the repository lacks it. A create that
    ///    fails because another run created the label first is tolerated.
    /// 4. Adds the label to the item.
    ///
    /// # Errors
    ///
    /// Returns [`LabelerError::Apply`] naming the failed step when any GitHub call fails.
    #[instrument(skip(self), fields(repository = %self.repository))]
    pub async fn ensure_label(&self, number: u64, label: &str) -> LabelerResult<ApplyOutcome> {
        let RepositoryId { owner, repo } = self.repository;

        let item_labels = self
            .client
            .list_item_labels(owner, repo, number)
            .await
            .map_err(apply_error(ApplyStep::ListItemLabels, label, number))?;

        if item_labels.iter().any(|l| l == label) {
            info!(label = label, number = number, "Label already present, skipping");
            return Ok(ApplyOutcome::AlreadyPresent);
        }

        let repository_labels = self
            .client
            .list_repository_labels(owner, repo, REPOSITORY_LABEL_PAGE_SIZE)
            .await
            .map_err(apply_error(ApplyStep::ListRepositoryLabels, label, number))?;

        let mut label_created = false;
        if repository_labels.iter().any(|l| l == label) {
            debug!(label = label, "Repository already defines the label");
        } else {
            let color = LabelColor::random();
            info!(label = label, color = %color, "Creating repository label");

            match self
                .client
                .create_label(owner, repo, label, color.hex())
                .await
            {
                Ok(()) => label_created = true,
                Err(github_client::Error::LabelAlreadyExists(_)) => {
                    warn!(
                        label = label,
                        "Label was created concurrently, continuing with the existing label"
                    );
                }
                Err(e) => return Err(apply_error(ApplyStep::CreateLabel, label, number)(e)),
            }
        }

        self.client
            .add_labels(owner, repo, number, &[label.to_string()])
            .await
            .map_err(apply_error(ApplyStep::AddLabel, label, number))?;

        info!(
            label = label,
            number = number,
            label_created = label_created,
            "Label applied"
        );

        Ok(ApplyOutcome::Applied { label_created })
    }
}

fn apply_error(
    step: ApplyStep,
    label: &str,
    number: u64,
) -> impl FnOnce(github_client::Error) -> LabelerError + '_ {
    move |source| LabelerError::Apply {
        step,
        label: label.to_string(),
        number,
        source,
    }
}
