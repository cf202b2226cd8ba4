use std::path::PathBuf;

use clap::Parser;
use title_labeler_cli::config::{resolve_event_path, resolve_token, AppConfig, RunSettings};
use title_labeler_cli::errors::Error;
use title_labeler_cli::outputs::reporter_for;
use title_labeler_cli::run::{execute, report_failure};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Title Labeler: label GitHub issues and pull requests from their title prefix
#[derive(Parser, Debug)]
#[command(name = "title-labeler", version)]
#[command(about = "Label GitHub issues and pull requests from their title prefix", long_about = None)]
struct Cli {
    /// Access token used for the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Path to the webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Root URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// File receiving the step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// TOML file with the labeling policy
    #[arg(long, env = "TITLE_LABELER_CONFIG")]
    config: Option<PathBuf>,
}

fn resolve_settings(cli: Cli) -> Result<RunSettings, Error> {
    let token = resolve_token(cli.github_token, |key| std::env::var(key).ok())?;
    let event_path = resolve_event_path(cli.event_path)?;

    let working_dir = std::env::current_dir()
        .map_err(|e| Error::Config(format!("Failed to read the working directory: {}", e)))?;
    let config = AppConfig::load_or_default(cli.config.as_deref(), &working_dir)?;

    Ok(RunSettings {
        token,
        event_path,
        repository: cli.repository,
        api_url: cli.api_url.filter(|u| !u.trim().is_empty()),
        policy: config.policy,
    })
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_env("TITLE_LABELER_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let reporter = reporter_for(cli.output_file.as_deref());

    let result = match resolve_settings(cli) {
        Ok(settings) => execute(&settings, reporter.as_ref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            info!("{outcome}");
            std::process::exit(0);
        }
        Err(e) => {
            report_failure(reporter.as_ref(), &e);
            error!("Error: {e}");
            std::process::exit(1);
        }
    }
}
