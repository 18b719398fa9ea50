pub use config::Config;
pub use diff::{diff_manifest, diff_section, Manifest};
pub use error::{Error, Result};
pub use event::{Envelope, PullRequestEvent};
pub use github::{GitHubClient, SourceControl};
pub use report::format_report;
pub use types::{ChangeKind, DependencyChange, FileChange, FileDiff, FileStatus, Outcome};

mod config;
mod diff;
mod error;
pub mod event;
pub mod github;
pub mod processor;
mod report;
mod types;

/// Creates a `DependencyChangesProcessor` talking to the GitHub REST API.
///
/// # Arguments
///
/// * `token`: Token used to authenticate every API request.
/// * `api_url`: Optional API base URL. Defaults to `https://api.github.com`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn new(
    token: &str,
    api_url: Option<&str>,
) -> Result<processor::DependencyChangesProcessor<GitHubClient>> {
    let client = GitHubClient::new(token, api_url.unwrap_or(github::DEFAULT_API_URL))?;
    Ok(processor::DependencyChangesProcessor::new(
        client,
        Config::default(),
    ))
}

/// Creates a `DependencyChangesProcessor` from the `GITHUB_TOKEN` and
/// `GITHUB_API_URL` environment variables.
///
/// # Errors
///
/// Returns an error if `GITHUB_TOKEN` is not set or the HTTP client cannot be built.
pub fn from_env() -> Result<processor::DependencyChangesProcessor<GitHubClient>> {
    let token = std::env::var("GITHUB_TOKEN")
        .map_err(|_| Error::ConfigError("GITHUB_TOKEN not set".to_string()))?;
    let api_url = std::env::var("GITHUB_API_URL").ok();
    new(&token, api_url.as_deref())
}
