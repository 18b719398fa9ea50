use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::event::Repository;
use crate::types::FileChange;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Most files a compare response lists; later files are never returned.
pub const COMPARE_FILES_LIMIT: usize = 300;

/// Source-control operations required to build and publish a report
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// List the files that differ between two refs of a repository
    ///
    /// # Errors
    ///
    /// Returns an error if the compare request fails
    async fn compare(&self, repo: &Repository, base: &str, head: &str) -> Result<Vec<FileChange>>;

    /// Get the raw content of a file at a specific ref
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be fetched
    async fn file_content(&self, repo: &Repository, path: &str, git_ref: &str) -> Result<String>;

    /// Attach a comment to a commit
    ///
    /// # Errors
    ///
    /// Returns an error if the comment cannot be created
    async fn create_commit_comment(&self, repo: &Repository, sha: &str, body: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct Comparison {
    #[serde(default)]
    files: Vec<FileChange>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

/// Implementation of source-control operations using the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
}

impl GitHubClient {
    /// Creates a client authenticated with `token` against `api_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the token or API URL is invalid, or the HTTP client cannot be built
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::ConfigError(format!("invalid token: {e}")))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let api_url = Url::parse(api_url)
            .map_err(|e| Error::ConfigError(format!("invalid API URL {api_url}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!("invalid API URL {api_url}")));
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self { http, api_url })
    }

    /// Builds `{api}/repos/{owner}/{repo}/{segments..}`, escaping each segment.
    fn repo_url(&self, repo: &Repository, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", repo.owner.login.as_str(), repo.name.as_str()])
                .extend(segments);
        }
        url
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ApiMessage>(&text).map_or(text, |m| m.message);
    debug!(status = status.as_u16(), message = %message, "GitHub API request failed");
    Err(Error::ApiError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SourceControl for GitHubClient {
    #[instrument(skip(self, repo), fields(repo = %repo.full_name()))]
    async fn compare(&self, repo: &Repository, base: &str, head: &str) -> Result<Vec<FileChange>> {
        let range = format!("{base}...{head}");
        let url = self.repo_url(repo, &["compare", range.as_str()]);
        let response = self
            .http
            .get(url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .send()
            .await?;

        let comparison: Comparison = check(response).await?.json().await?;
        debug!(files = comparison.files.len(), "Compare completed");
        if comparison.files.len() >= COMPARE_FILES_LIMIT {
            warn!(
                files = comparison.files.len(),
                "Compare hit the file limit, later files are not inspected"
            );
        }
        Ok(comparison.files)
    }

    #[instrument(skip(self, repo), fields(repo = %repo.full_name()))]
    async fn file_content(&self, repo: &Repository, path: &str, git_ref: &str) -> Result<String> {
        let segments: Vec<&str> = std::iter::once("contents").chain(path.split('/')).collect();
        let url = self.repo_url(repo, &segments);
        let response = self
            .http
            .get(url)
            .query(&[("ref", git_ref)])
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;

        let content = check(response).await?.text().await?;
        debug!(content_length = content.len(), "File content retrieved");
        Ok(content)
    }

    #[instrument(skip(self, repo, body), fields(repo = %repo.full_name(), body_length = body.len()))]
    async fn create_commit_comment(&self, repo: &Repository, sha: &str, body: &str) -> Result<()> {
        let url = self.repo_url(repo, &["commits", sha, "comments"]);
        let response = self
            .http
            .post(url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .json(&NewComment { body })
            .send()
            .await?;

        check(response).await?;
        debug!("Commit comment created");
        Ok(())
    }
}
