use serde::Deserialize;

/// Status of a file in a compare between two refs, as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileChange {
    #[serde(rename = "filename")]
    pub path: String,
    pub status: FileStatus,
}

/// A single dependency entry that differs between two manifests.
///
/// Whether the entry was added, removed or changed follows from which of
/// `previous` and `current` are present; see [`DependencyChange::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub name: String,
    pub previous: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

impl DependencyChange {
    #[must_use]
    pub fn added(name: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            previous: None,
            current: Some(current.into()),
        }
    }

    #[must_use]
    pub fn removed(name: impl Into<String>, previous: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            previous: Some(previous.into()),
            current: None,
        }
    }

    #[must_use]
    pub fn changed(
        name: impl Into<String>,
        previous: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            previous: Some(previous.into()),
            current: Some(current.into()),
        }
    }

    /// Derives the kind of change from the presence of each side.
    /// A record with neither side is not a change at all.
    #[must_use]
    pub fn kind(&self) -> Option<ChangeKind> {
        match (&self.previous, &self.current) {
            (None, Some(_)) => Some(ChangeKind::Added),
            (Some(_), None) => Some(ChangeKind::Removed),
            (Some(_), Some(_)) => Some(ChangeKind::Changed),
            (None, None) => None,
        }
    }
}

/// Dependency changes found in one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub changes: Vec<DependencyChange>,
}

/// Result of handling one pull request event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No candidate manifest, or at least one candidate without dependency changes.
    NoChanges,
    /// Dry run: the comment body that would have been posted.
    DryRun(String),
    /// The comment body posted on the head commit.
    Commented(String),
}
