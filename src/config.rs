/// Immutable settings injected into the diff engine and the processor.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dependency sections of a manifest, in the order their changes are reported.
    pub sections: Vec<String>,
    /// Webhook event name that is handled (`X-GitHub-Event`).
    pub event_name: String,
    /// Pull request actions that trigger a report.
    pub accepted_actions: Vec<String>,
    /// Exact basename a changed file must have to be inspected.
    pub manifest_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sections: [
                "bundledDependencies",
                "dependencies",
                "devDependencies",
                "optionalDependencies",
                "peerDependencies",
            ]
            .map(String::from)
            .to_vec(),
            event_name: "pull_request".to_string(),
            accepted_actions: ["opened", "synchronize", "reopened"]
                .map(String::from)
                .to_vec(),
            manifest_name: "package.json".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn accepts_action(&self, action: &str) -> bool {
        self.accepted_actions.iter().any(|a| a == action)
    }

    /// A file is inspected only when it was modified in place and its
    /// basename is exactly the manifest name, at any directory depth.
    #[must_use]
    pub fn is_candidate(&self, change: &crate::FileChange) -> bool {
        change.status == crate::FileStatus::Modified
            && change.path.rsplit('/').next() == Some(self.manifest_name.as_str())
    }
}
