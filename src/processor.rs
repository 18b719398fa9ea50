use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::diff::{diff_manifest, Manifest};
use crate::error::{Error, Result};
use crate::event::{Branch, Envelope};
use crate::github::SourceControl;
use crate::report::format_report;
use crate::types::{FileChange, FileDiff, Outcome};

/// Turns pull request events into dependency change reports
pub struct DependencyChangesProcessor<S> {
    source: S,
    config: Config,
}

impl<S: SourceControl> DependencyChangesProcessor<S> {
    #[must_use]
    pub const fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Handles one event: lists the manifests changed by the pull request,
    /// diffs their dependencies and posts the report on the head commit
    /// (or returns it, for a dry run).
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not a handled pull request action, a
    /// manifest is not valid JSON, or a source-control request fails.
    #[instrument(
        skip_all,
        fields(
            event = %envelope.event_name,
            action = %envelope.payload.action,
            base_ref = %envelope.payload.pull_request.base.git_ref,
            head_ref = %envelope.payload.pull_request.head.git_ref,
            dry_run = envelope.dry_run
        )
    )]
    pub async fn process(&self, envelope: &Envelope) -> Result<Outcome> {
        envelope.ensure_supported(&self.config)?;

        let pull_request = &envelope.payload.pull_request;
        let (base, head) = (&pull_request.base, &pull_request.head);

        let candidates = self.list_candidates(base, head).await?;
        if candidates.is_empty() {
            info!("No package manifests modified");
            return Ok(Outcome::NoChanges);
        }

        let Some(files) = self.diff_candidates(&candidates, base, head).await? else {
            info!("No dependencies changed");
            return Ok(Outcome::NoChanges);
        };

        let body = format_report(&files, &base.sha, &head.sha);
        if envelope.dry_run {
            debug!("Dry run, comment not posted");
            return Ok(Outcome::DryRun(body));
        }

        self.source
            .create_commit_comment(&base.repo, &head.sha, &body)
            .await?;
        info!(files = files.len(), sha = %head.sha, "Dependency changes reported");
        Ok(Outcome::Commented(body))
    }

    /// Lists the modified manifests between the two sides of a pull request.
    #[instrument(skip_all)]
    async fn list_candidates(&self, base: &Branch, head: &Branch) -> Result<Vec<FileChange>> {
        let head_spec = if head.repo == base.repo {
            head.sha.clone()
        } else {
            format!("{}:{}", head.repo.owner.login, head.sha)
        };

        let changes = self
            .source
            .compare(&base.repo, &base.sha, &head_spec)
            .await?;
        let candidates: Vec<FileChange> = changes
            .into_iter()
            .filter(|change| self.config.is_candidate(change))
            .collect();

        debug!(candidates = candidates.len(), "Candidate manifests selected");
        Ok(candidates)
    }

    /// Fetches and parses both versions of every candidate, then diffs them
    /// in candidate order. Returns `None` if any candidate has no dependency
    /// changes: a report is only produced when every candidate has some.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    async fn diff_candidates(
        &self,
        candidates: &[FileChange],
        base: &Branch,
        head: &Branch,
    ) -> Result<Option<Vec<FileDiff>>> {
        let originals = try_join_all(candidates.iter().map(|change| {
            self.source
                .file_content(&base.repo, &change.path, &base.sha)
        }));
        let currents = try_join_all(candidates.iter().map(|change| {
            self.source
                .file_content(&head.repo, &change.path, &head.sha)
        }));
        let (originals, currents) = futures::try_join!(originals, currents)?;

        let manifests = candidates
            .iter()
            .zip(originals.iter().zip(&currents))
            .map(|(change, (original, current))| {
                Ok::<_, Error>((
                    Manifest::parse(&change.path, original)?,
                    Manifest::parse(&change.path, current)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::with_capacity(candidates.len());
        for (change, (original, current)) in candidates.iter().zip(&manifests) {
            let changes = diff_manifest(original, current, &self.config.sections);

            debug!(path = %change.path, changes = changes.len(), "Manifest compared");
            if changes.is_empty() {
                return Ok(None);
            }
            files.push(FileDiff {
                path: change.path.clone(),
                changes,
            });
        }
        Ok(Some(files))
    }
}
