//! Runs one labeling pass: resolve the context, classify the title, apply the label.

use std::fmt;

use github_client::LabelClient;
use tracing::{info, instrument, warn};

use crate::classifier::{classify, Classification, LabelPolicy, TypeLabel};
use crate::context::{EventContext, EventPayload, ItemKind};
use crate::errors::LabelerResult;
use crate::label_applicator::{ApplyOutcome, LabelApplicator};
use crate::reporting::{StatusReporter, OUTPUT_LABEL, OUTPUT_MESSAGE, OUTPUT_OUTCOME};

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

/// Why a run finished without touching the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The title was present but not a string.
    TitleNotString,

    /// The title has no bracketed prefix.
    NoPrefix,

    /// The prefix matched no keyword group and the policy has no fallback for the item kind.
    NoMatchingKeyword { prefix: String },
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Labeled {
        kind: ItemKind,
        number: u64,
        label: TypeLabel,
        label_created: bool,
    },
    AlreadyLabeled {
        kind: ItemKind,
        number: u64,
        label: TypeLabel,
    },
    Skipped {
        kind: ItemKind,
        number: u64,
        reason: SkipReason,
    },
}

impl RunOutcome {
    /// The value published as the `outcome` output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labeled { .. } => "labeled",
            Self::AlreadyLabeled { .. } => "already-labeled",
            Self::Skipped { .. } => "skipped",
        }
    }

    /// The label that was chosen, if the run got that far.
    pub fn label(&self) -> Option<TypeLabel> {
        match self {
            Self::Labeled { label, .. } | Self::AlreadyLabeled { label, .. } => Some(*label),
            Self::Skipped { .. } => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labeled {
                kind,
                number,
                label,
                label_created: true,
            } => write!(f, "Created label {label} and added it to {kind} #{number}"),
            Self::Labeled {
                kind,
                number,
                label,
                ..
            } => write!(f, "Added label {label} to {kind} #{number}"),
            Self::AlreadyLabeled {
                kind,
                number,
                label,
            } => write!(f, "Label {label} is already on {kind} #{number}, skip"),
            Self::Skipped {
                kind,
                reason: SkipReason::TitleNotString,
                ..
            } => write!(f, "The {kind} title is not a string, skip"),
            Self::Skipped {
                kind,
                reason: SkipReason::NoPrefix,
                ..
            } => write!(f, "No {kind} title prefix found, skip"),
            Self::Skipped {
                kind,
                reason: SkipReason::NoMatchingKeyword { prefix },
                ..
            } => write!(f, "The {kind} title prefix {prefix} matches no label, skip"),
        }
    }
}

/// Labels one issue or pull request per run.
///
/// The GitHub client and the status reporter are injected so that one client instance serves
/// the whole run and tests can substitute both.
pub struct TitleLabeler<'a> {
    client: &'a dyn LabelClient,
    reporter: &'a dyn StatusReporter,
    policy: LabelPolicy,
}

impl<'a> TitleLabeler<'a> {
    pub fn new(
        client: &'a dyn LabelClient,
        reporter: &'a dyn StatusReporter,
        policy: LabelPolicy,
    ) -> Self {
        Self {
            client,
            reporter,
            policy,
        }
    }

    /// Resolves the payload, then classifies and labels the item it describes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LabelerError::Context`] before any API call when the payload is
    /// unusable, or [`crate::LabelerError::Apply`] when a GitHub call fails.
    pub async fn run(
        &self,
        payload: &EventPayload,
        repository: Option<&str>,
    ) -> LabelerResult<RunOutcome> {
        let context = EventContext::resolve(payload, repository)?;
        self.run_context(&context).await
    }

    /// Classifies and labels an already resolved item.
    #[instrument(skip(self, context), fields(repository = %context.repository, kind = %context.kind, number = context.number))]
    pub async fn run_context(&self, context: &EventContext) -> LabelerResult<RunOutcome> {
        let kind = context.kind;
        let number = context.number;

        let classification = classify(context.title.as_deref());
        info!(classification = ?classification, "Classified title");

        let Some(label) = self.policy.label_for(&classification, kind) else {
            let reason = match classification {
                Classification::Unclassified => SkipReason::TitleNotString,
                Classification::NoPrefix => SkipReason::NoPrefix,
                Classification::NoMatch { prefix } | Classification::Matched { prefix, .. } => {
                    SkipReason::NoMatchingKeyword { prefix }
                }
            };
            let outcome = RunOutcome::Skipped {
                kind,
                number,
                reason,
            };
            self.report(&outcome);
            return Ok(outcome);
        };

        let applicator = LabelApplicator::new(self.client, &context.repository);
        let outcome = match applicator.ensure_label(number, label.name()).await? {
            ApplyOutcome::AlreadyPresent => RunOutcome::AlreadyLabeled {
                kind,
                number,
                label,
            },
            ApplyOutcome::Applied { label_created } => RunOutcome::Labeled {
                kind,
                number,
                label,
                label_created,
            },
        };

        self.report(&outcome);
        Ok(outcome)
    }

    fn report(&self, outcome: &RunOutcome) {
        info!(outcome = outcome.as_str(), "{}", outcome);

        let mut outputs = vec![(OUTPUT_OUTCOME, outcome.as_str().to_string())];
        if let Some(label) = outcome.label() {
            outputs.push((OUTPUT_LABEL, label.name().to_string()));
        }
        outputs.push((OUTPUT_MESSAGE, outcome.to_string()));

        for (name, value) in outputs {
            if let Err(e) = self.reporter.set_output(name, &value) {
                warn!(output = name, error = %e, "Failed to write status output");
            }
        }
    }
}
