use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::DependencyChange;

/// A parsed `package.json`, keys kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// Parses manifest content fetched from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestParseError`] if the content is not a JSON object.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map(Self)
            .map_err(|source| Error::ManifestParseError {
                path: path.to_string(),
                source,
            })
    }

    /// Returns a dependency section, or `None` when the manifest does not
    /// declare it as an object.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn range(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Diffs one dependency section.
///
/// Returns `None` when either side lacks the section, so an untouched
/// section is distinguishable from an emptied one. Otherwise the result is
/// every added entry (in `current` order), then every removed entry, then
/// every entry whose range differs textually (both in `original` order).
#[must_use]
pub fn diff_section(
    original: Option<&Map<String, Value>>,
    current: Option<&Map<String, Value>>,
) -> Option<Vec<DependencyChange>> {
    let (original, current) = (original?, current?);

    let added = current
        .iter()
        .filter(|(name, _)| !original.contains_key(*name))
        .map(|(name, value)| DependencyChange::added(name, range(value)));

    let removed = original
        .iter()
        .filter(|(name, _)| !current.contains_key(*name))
        .map(|(name, value)| DependencyChange::removed(name, range(value)));

    let changed = original.iter().filter_map(|(name, previous)| {
        let (previous, current) = (range(previous), range(current.get(name)?));
        (previous != current).then(|| DependencyChange::changed(name, previous, current))
    });

    Some(added.chain(removed).chain(changed).collect())
}

/// Diffs every recognized section of two manifests, in `sections` order.
#[instrument(skip_all, fields(sections = sections.len()))]
pub fn diff_manifest<S: AsRef<str>>(
    original: &Manifest,
    current: &Manifest,
    sections: &[S],
) -> Vec<DependencyChange> {
    let changes: Vec<DependencyChange> = sections
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            diff_section(original.section(name), current.section(name))
        })
        .flatten()
        .collect();

    debug!(changes = changes.len(), "Manifest diffed");
    changes
}
