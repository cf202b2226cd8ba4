//! Configuration management for the title labeler CLI.
//!
//! Runtime settings come from command line flags and the environment GitHub Actions provides
//! (`GITHUB_TOKEN`, `GITHUB_EVENT_PATH`, `GITHUB_REPOSITORY`, ...). The labeling policy can be
//! adjusted with an optional TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use title_labeler_core::LabelPolicy;
use tracing::{debug, info};

use crate::errors::Error;

/// Policy file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = ".github/title-labeler.toml";

/// Environment variable GitHub Actions uses for the action's `github-token` input.
pub const TOKEN_INPUT_ENV: &str = "INPUT_GITHUB-TOKEN";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Contents of the optional policy file.
///
/// # Example TOML Configuration
///
/// ```toml
/// [policy]
/// help_on_pull_requests = true
/// issue_fallback = true
/// pull_request_fallback = false
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub policy: LabelPolicy,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or is not valid
    /// TOML for this structure.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the explicitly requested file, or the default file when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default file yields the
    /// default policy.
    pub fn load_or_default(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = working_dir.join(DEFAULT_CONFIG_FILENAME);
        if default_path.exists() {
            info!(path = ?default_path, "Using policy file");
            Self::load(&default_path)
        } else {
            debug!("No policy file found, using the default policy");
            Ok(Self::default())
        }
    }
}

/// Everything a labeling run needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub token: String,
    pub event_path: PathBuf,
    pub repository: Option<String>,
    pub api_url: Option<String>,
    pub policy: LabelPolicy,
}

/// Picks the access token from the flag (or `GITHUB_TOKEN`), then the action input.
///
/// Empty values count as absent.
///
/// # Errors
///
/// Returns `Error::Config` when no token is available.
pub fn resolve_token(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, Error> {
    explicit
        .filter(|t| !t.trim().is_empty())
        .or_else(|| lookup(TOKEN_INPUT_ENV).filter(|t| !t.trim().is_empty()))
        .map(|t| t.trim().to_string())
        .ok_or_else(|| Error::Config("No token found, please set github-token input.".to_string()))
}

/// Requires the event payload path.
pub fn resolve_event_path(explicit: Option<PathBuf>) -> Result<PathBuf, Error> {
    explicit
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            Error::Config(
                "No event payload found, please set GITHUB_EVENT_PATH or --event-path.".to_string(),
            )
        })
}
