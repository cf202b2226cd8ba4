//! Step outputs for GitHub Actions.
//!
//! Actions collects step outputs from the file named by `GITHUB_OUTPUT`. Single line values are
//! written as `name=value`; multi-line values use the `name<<DELIMITER` form with a random
//! delimiter.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::distributions::Alphanumeric;
use rand::Rng;
use title_labeler_core::{LogReporter, StatusReporter};

#[cfg(test)]
#[path = "outputs_tests.rs"]
mod tests;

/// Appends outputs to the Actions output file.
#[derive(Debug, Clone)]
pub struct GitHubOutputFile {
    path: PathBuf,
}

impl GitHubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatusReporter for GitHubOutputFile {
    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_output(name, value).as_bytes())
    }
}

/// Chooses the output file when one is configured, the log otherwise.
pub fn reporter_for(output_file: Option<&Path>) -> Box<dyn StatusReporter> {
    match output_file.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => Box::new(GitHubOutputFile::new(path)),
        None => Box::new(LogReporter),
    }
}

fn format_output(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let delimiter = loop {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(20)
            .map(char::from)
            .collect();
        let candidate = format!("ghadelimiter_{suffix}");
        if !value.contains(&candidate) {
            break candidate;
        }
    };

    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
