//! Title classification.
//!
//! A title such as `[Bug] crash on start` carries a bracketed prefix. The prefix is matched
//! against ordered keyword groups and the first group containing a hit decides the label.
//! Matching is a case-insensitive substring test, so `[Prefix]` counts as a bug because it
//! contains `fix`.
//!
//! [`classify`] is pure. Whether a classification results in a label for a particular kind of
//! item is decided separately by [`LabelPolicy`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::ItemKind;

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

/// Bracketed prefix at the start of the title, one whitespace character, then the remainder.
static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[.*\])\s(.*)").expect("prefix pattern is a valid regex"));

/// Keyword groups in priority order.
const KEYWORD_GROUPS: [(TypeLabel, &[&str]); 3] = [
    (TypeLabel::Bug, &["bug", "fix", "fixes", "fixed"]),
    (TypeLabel::Feature, &["feature", "feat"]),
    (TypeLabel::Help, &["question", "help", "support", "how"]),
];

/// The fixed label taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeLabel {
    Bug,
    Feature,
    Help,
    Other,
}

impl TypeLabel {
    /// The label name as it appears on GitHub.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bug => "Type: Bug",
            Self::Feature => "Type: Feature",
            Self::Help => "Type: Help",
            Self::Other => "Type: Other",
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of classifying a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// There was no usable title string.
    Unclassified,

    /// The title does not start with a bracketed prefix.
    NoPrefix,

    /// The title has a prefix but it contains none of the keywords.
    NoMatch { prefix: String },

    /// The prefix matched a keyword group.
    Matched { label: TypeLabel, prefix: String },
}

/// Classifies a title by its bracketed prefix.
///
/// The returned prefix keeps its brackets and is lower-cased.
///
/// # Examples
///
/// ```
/// use title_labeler_core::{classify, Classification, TypeLabel};
///
/// assert_eq!(
///     classify(Some("[Bug] fix typo")),
///     Classification::Matched { label: TypeLabel::Bug, prefix: "[bug]".to_string() }
/// );
/// assert_eq!(classify(Some("no brackets here")), Classification::NoPrefix);
/// assert_eq!(classify(None), Classification::Unclassified);
/// ```
pub fn classify(title: Option<&str>) -> Classification {
    let Some(title) = title else {
        return Classification::Unclassified;
    };

    let Some(captures) = PREFIX_PATTERN.captures(title) else {
        return Classification::NoPrefix;
    };

    let prefix = captures[1].to_lowercase();

    let matched = KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| prefix.contains(k)))
        .map(|(label, _)| *label);

    match matched {
        Some(label) => Classification::Matched { label, prefix },
        None => Classification::NoMatch { prefix },
    }
}

/// Decides which label, if any, a classification earns for a kind of item.
///
/// The defaults apply the same rules to issues and pull requests: every keyword group is
/// recognised and an unmatched prefix gets no label.
///
/// # Example TOML
///
/// ```toml
/// help_on_pull_requests = false
/// issue_fallback = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPolicy {
    /// Whether the help keywords label pull requests. When off they count as unmatched.
    pub help_on_pull_requests: bool,

    /// Label issues with an unmatched prefix as `Type: Other`.
    pub issue_fallback: bool,

    /// Label pull requests with an unmatched prefix as `Type: Other`.
    pub pull_request_fallback: bool,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            help_on_pull_requests: true,
            issue_fallback: false,
            pull_request_fallback: false,
        }
    }
}

impl LabelPolicy {
    /// Returns the label to apply, or `None` when the item should be left alone.
    pub fn label_for(&self, classification: &Classification, kind: ItemKind) -> Option<TypeLabel> {
        let fallback = match kind {
            ItemKind::Issue => self.issue_fallback,
            ItemKind::PullRequest => self.pull_request_fallback,
        };

        match classification {
            Classification::Unclassified | Classification::NoPrefix => None,
            Classification::Matched {
                label: TypeLabel::Help,
                ..
            } if kind == ItemKind::PullRequest && !self.help_on_pull_requests => {
                fallback.then_some(TypeLabel::Other)
            }
            Classification::Matched { label, .. } => Some(*label),
            Classification::NoMatch { .. } => fallback.then_some(TypeLabel::Other),
        }
    }
}
