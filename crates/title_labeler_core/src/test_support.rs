//! In-memory test doubles for the GitHub client and the status reporter.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{Error, LabelClient};

use crate::reporting::StatusReporter;

/// A call received by [`RecordingLabelClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListItemLabels { number: u64 },
    ListRepositoryLabels { per_page: u8 },
    CreateLabel { name: String, color: String },
    AddLabels { number: u64, labels: Vec<String> },
}

/// Behaves like the GitHub label endpoints against in-memory state and records every call.
#[derive(Default)]
pub struct RecordingLabelClient {
    item_labels: Mutex<HashMap<u64, Vec<String>>>,
    repository_labels: Mutex<Vec<String>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, fn() -> Error>>,
}

impl RecordingLabelClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository_labels(self, labels: &[&str]) -> Self {
        *self.repository_labels.lock().unwrap() = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_item_labels(self, number: u64, labels: &[&str]) -> Self {
        self.item_labels
            .lock()
            .unwrap()
            .insert(number, labels.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Makes the named operation fail with the error produced by `error`.
    pub fn failing(self, operation: &'static str, error: fn() -> Error) -> Self {
        self.failures.lock().unwrap().insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn item_labels(&self, number: u64) -> Vec<String> {
        self.item_labels
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn repository_labels(&self) -> Vec<String> {
        self.repository_labels.lock().unwrap().clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LabelClient for RecordingLabelClient {
    async fn list_item_labels(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<Vec<String>, Error> {
        self.record(Call::ListItemLabels { number }, "list_item_labels")?;
        Ok(self.item_labels(number))
    }

    async fn list_repository_labels(
        &self,
        _owner: &str,
        _repo: &str,
        per_page: u8,
    ) -> Result<Vec<String>, Error> {
        self.record(
            Call::ListRepositoryLabels { per_page },
            "list_repository_labels",
        )?;
        Ok(self.repository_labels())
    }

    async fn create_label(
        &self,
        _owner: &str,
        _repo: &str,
        name: &str,
        color: &str,
    ) -> Result<(), Error> {
        self.record(
            Call::CreateLabel {
                name: name.to_string(),
                color: color.to_string(),
            },
            "create_label",
        )?;

        let mut labels = self.repository_labels.lock().unwrap();
        if labels.iter().any(|l| l == name) {
            return Err(Error::LabelAlreadyExists(name.to_string()));
        }
        labels.push(name.to_string());
        Ok(())
    }

    async fn add_labels(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        self.record(
            Call::AddLabels {
                number,
                labels: labels.to_vec(),
            },
            "add_labels",
        )?;

        let mut items = self.item_labels.lock().unwrap();
        let current = items.entry(number).or_default();
        for label in labels {
            if !current.contains(label) {
                current.push(label.clone());
            }
        }
        Ok(())
    }
}

/// Captures status outputs in order.
#[derive(Default)]
pub struct RecordingReporter {
    outputs: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn outputs(&self) -> Vec<(String, String)> {
        self.outputs.lock().unwrap().clone()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        self.outputs()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl StatusReporter for RecordingReporter {
    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        self.outputs
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }
}
