use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

impl Repository {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// One side (base or head) of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branch {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: String,
    pub repo: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub base: Branch,
    pub head: Branch,
}

/// The subset of a `pull_request` webhook payload used to build a report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    #[serde(default)]
    pub number: u64,
    pub pull_request: PullRequest,
}

/// An already-authenticated webhook delivery.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub event_name: String,
    pub payload: PullRequestEvent,
    pub dry_run: bool,
}

impl Envelope {
    /// Builds an envelope from a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EventPayloadError`] if the body is not a pull request payload.
    pub fn from_slice(event_name: &str, body: &[u8], dry_run: bool) -> Result<Self> {
        let payload = serde_json::from_slice(body).map_err(Error::EventPayloadError)?;
        Ok(Self {
            event_name: event_name.to_string(),
            payload,
            dry_run,
        })
    }

    /// Builds an envelope from a payload file, such as the one a CI runner
    /// writes for the triggering event.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a pull request payload.
    #[instrument]
    pub fn from_path(event_name: &str, path: &Path, dry_run: bool) -> Result<Self> {
        let body = fs::read(path)?;
        debug!(bytes = body.len(), "Event payload read");
        Self::from_slice(event_name, &body, dry_run)
    }

    /// Rejects events that are not a handled pull request action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEvent`] when the event name or action is not accepted.
    pub fn ensure_supported(&self, config: &Config) -> Result<()> {
        if self.event_name == config.event_name && config.accepts_action(&self.payload.action) {
            return Ok(());
        }
        debug!(event = %self.event_name, action = %self.payload.action, "Event rejected");
        Err(Error::UnsupportedEvent {
            event: self.event_name.clone(),
            action: self.payload.action.clone(),
        })
    }
}
