//! The labeling command.

use std::fs;
use std::path::Path;

use github_client::{create_token_client, GitHubClient};
use title_labeler_core::{
    EventPayload, RunOutcome, StatusReporter, TitleLabeler, OUTPUT_MESSAGE, OUTPUT_OUTCOME,
};
use tracing::{info, instrument, warn};

use crate::config::RunSettings;
use crate::errors::Error;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Reads and parses the webhook payload of the triggering event.
pub fn read_event(path: &Path) -> Result<EventPayload, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::LoadEvent {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(Error::ParseEvent)
}

/// Labels the item described by the event payload.
///
/// The payload is read and resolved before the GitHub client issues any request.
#[instrument(skip(settings, reporter), fields(event_path = ?settings.event_path))]
pub async fn execute(
    settings: &RunSettings,
    reporter: &dyn StatusReporter,
) -> Result<RunOutcome, Error> {
    let payload = read_event(&settings.event_path)?;

    let octocrab =
        create_token_client(&settings.token, settings.api_url.as_deref()).map_err(Error::Client)?;
    let client = GitHubClient::new(octocrab);

    let labeler = TitleLabeler::new(&client, reporter, settings.policy.clone());
    let outcome = labeler
        .run(&payload, settings.repository.as_deref())
        .await?;

    info!(outcome = outcome.as_str(), "Labeling finished");
    Ok(outcome)
}

/// Publishes a failed outcome together with the error message.
pub fn report_failure(reporter: &dyn StatusReporter, error: &Error) {
    let outputs = [(OUTPUT_OUTCOME, "failed".to_string()), (OUTPUT_MESSAGE, error.to_string())];

    for (name, value) in outputs {
        if let Err(e) = reporter.set_output(name, &value) {
            warn!(output = name, error = %e, "Failed to write status output");
        }
    }
}
