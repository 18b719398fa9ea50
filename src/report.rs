use crate::types::{ChangeKind, DependencyChange, FileDiff};

/// Renders the Markdown comment body for a set of changed manifests.
///
/// ~~~text
/// <base>...<head> includes dependency changes!
///
/// "package.json" *(1 modified, 1 added, 1 removed)*:
/// ```
/// + honeybee@^2.0.0 (from ^1.0.0)
/// + bluebird@2.0.0
/// - browserify@^1.0.0
/// ```
/// ~~~
#[must_use]
pub fn format_report(files: &[FileDiff], base_ref: &str, head_ref: &str) -> String {
    let mut out = format!("{base_ref}...{head_ref} includes dependency changes!\n");
    for file in files {
        write_file_section(&mut out, file);
    }
    out
}

fn write_file_section(out: &mut String, file: &FileDiff) {
    let of_kind = |kind: ChangeKind| {
        file.changes
            .iter()
            .filter(|change| change.kind() == Some(kind))
            .collect::<Vec<_>>()
    };
    let added = of_kind(ChangeKind::Added);
    let changed = of_kind(ChangeKind::Changed);
    let removed = of_kind(ChangeKind::Removed);

    let title = serde_json::to_string(&file.path).unwrap_or_else(|_| format!("{:?}", file.path));
    out.push_str(&format!(
        "\n{title} *({} modified, {} added, {} removed)*:\n```\n",
        changed.len(),
        added.len(),
        removed.len()
    ));

    for change in changed {
        out.push_str(&format!(
            "+ {}@{} (from {})\n",
            change.name,
            current(change),
            previous(change)
        ));
    }
    for change in added {
        out.push_str(&format!("+ {}@{}\n", change.name, current(change)));
    }
    for change in removed {
        out.push_str(&format!("- {}@{}\n", change.name, previous(change)));
    }
    out.push_str("```\n");
}

fn previous(change: &DependencyChange) -> &str {
    change.previous.as_deref().unwrap_or_default()
}

fn current(change: &DependencyChange) -> &str {
    change.current.as_deref().unwrap_or_default()
}
