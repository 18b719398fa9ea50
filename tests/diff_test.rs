use dependency_changes::{
    diff_manifest, diff_section, ChangeKind, Config, DependencyChange, Manifest,
};
use serde_json::{json, Value};

fn manifest(value: Value) -> Manifest {
    Manifest::parse("package.json", &value.to_string()).expect("Failed to parse manifest")
}

fn sections() -> Vec<String> {
    Config::default().sections
}

#[test]
fn test_diff_manifest_reports_changed_added_and_removed() {
    let original = manifest(json!({"dependencies": {"a": "^1.0.0", "b": "^1.0.0"}}));
    let current = manifest(json!({"dependencies": {"a": "^2.0.0", "c": "1.0.0"}}));

    let changes = diff_manifest(&original, &current, &sections());

    assert_eq!(
        changes,
        vec![
            DependencyChange::added("c", "1.0.0"),
            DependencyChange::removed("b", "^1.0.0"),
            DependencyChange::changed("a", "^1.0.0", "^2.0.0"),
        ]
    );
}

#[test]
fn test_diff_manifest_of_identical_manifests_is_empty() {
    let original = manifest(json!({
        "name": "hive",
        "dependencies": {"honeybee": "^1.0.0"},
        "devDependencies": {"mocha": "~2.0.0"},
        "peerDependencies": {"react": ">=16"}
    }));

    assert!(diff_manifest(&original, &original.clone(), &sections()).is_empty());
}

#[test]
fn test_diff_manifest_swapping_sides_swaps_every_record() {
    let a = manifest(json!({
        "dependencies": {"a": "^1.0.0", "b": "^1.0.0"},
        "devDependencies": {"x": "1.0.0"}
    }));
    let b = manifest(json!({
        "dependencies": {"a": "^2.0.0", "c": "1.0.0"},
        "devDependencies": {}
    }));

    let forward = diff_manifest(&a, &b, &sections());
    let mut backward = diff_manifest(&b, &a, &sections());

    assert_eq!(forward.len(), backward.len());
    for change in &forward {
        let position = backward
            .iter()
            .position(|other| other.name == change.name)
            .expect("Every name should appear in both directions");
        let other = backward.remove(position);
        assert_eq!(other.previous, change.current);
        assert_eq!(other.current, change.previous);
    }
    assert!(backward.is_empty());
}

#[test]
fn test_diff_section_absent_on_either_side_is_none() {
    let deps = json!({"a": "1.0.0"});
    let deps = deps.as_object();

    assert_eq!(diff_section(None, None), None);
    assert_eq!(diff_section(deps, None), None);
    assert_eq!(diff_section(None, deps), None);
}

#[test]
fn test_section_missing_from_one_manifest_contributes_nothing() {
    let original = manifest(json!({"devDependencies": {"mocha": "1.0.0"}}));
    let current = manifest(json!({
        "dependencies": {"a": "1.0.0"},
        "devDependencies": {"mocha": "2.0.0"}
    }));

    let changes = diff_manifest(&original, &current, &sections());

    assert_eq!(
        changes,
        vec![DependencyChange::changed("mocha", "1.0.0", "2.0.0")]
    );
}

#[test]
fn test_emptied_section_reports_removals() {
    let original = manifest(json!({"dependencies": {"a": "1.0.0", "b": "2.0.0"}}));
    let current = manifest(json!({"dependencies": {}}));

    let changes = diff_manifest(&original, &current, &sections());

    assert_eq!(
        changes,
        vec![
            DependencyChange::removed("a", "1.0.0"),
            DependencyChange::removed("b", "2.0.0"),
        ]
    );
}

#[test]
fn test_ranges_are_compared_as_exact_strings() {
    let original = manifest(json!({"dependencies": {"a": "^1.0.0", "b": "1.0.0"}}));
    let current = manifest(json!({"dependencies": {"a": "^1.0.0 ", "b": "1.0.0"}}));

    let changes = diff_manifest(&original, &current, &sections());

    assert_eq!(
        changes,
        vec![DependencyChange::changed("a", "^1.0.0", "^1.0.0 ")]
    );
}

#[test]
fn test_changes_follow_section_order_then_manifest_key_order() {
    let original = manifest(json!({
        "peerDependencies": {"react": "16"},
        "dependencies": {"zeta": "1.0.0", "alpha": "1.0.0"},
        "bundledDependencies": {}
    }));
    let current = manifest(json!({
        "peerDependencies": {"react": "17"},
        "dependencies": {"zeta": "2.0.0", "alpha": "2.0.0", "omega": "1.0.0", "beta": "1.0.0"},
        "bundledDependencies": {"bundled": "1.0.0"}
    }));

    let names: Vec<String> = diff_manifest(&original, &current, &sections())
        .into_iter()
        .map(|change| change.name)
        .collect();

    assert_eq!(
        names,
        ["bundled", "omega", "beta", "zeta", "alpha", "react"]
    );
}

#[test]
fn test_unrecognized_sections_are_ignored() {
    let original = manifest(json!({"scripts": {"test": "mocha"}, "engines": {"node": "18"}}));
    let current = manifest(json!({"scripts": {"test": "jest"}, "engines": {"node": "20"}}));

    assert!(diff_manifest(&original, &current, &sections()).is_empty());
}

#[test]
fn test_injected_sections_limit_the_diff() {
    let original = manifest(json!({
        "dependencies": {"a": "1.0.0"},
        "devDependencies": {"b": "1.0.0"}
    }));
    let current = manifest(json!({
        "dependencies": {"a": "2.0.0"},
        "devDependencies": {"b": "2.0.0"}
    }));

    let changes = diff_manifest(&original, &current, &["devDependencies"]);

    assert_eq!(changes, vec![DependencyChange::changed("b", "1.0.0", "2.0.0")]);
}

#[test]
fn test_change_kind_is_derived_from_present_sides() {
    assert_eq!(
        DependencyChange::added("a", "1.0.0").kind(),
        Some(ChangeKind::Added)
    );
    assert_eq!(
        DependencyChange::removed("a", "1.0.0").kind(),
        Some(ChangeKind::Removed)
    );
    assert_eq!(
        DependencyChange::changed("a", "1.0.0", "2.0.0").kind(),
        Some(ChangeKind::Changed)
    );
}

#[test]
fn test_invalid_manifest_is_a_parse_error() {
    let err = Manifest::parse("packages/app/package.json", "{ not json").unwrap_err();
    assert!(matches!(
        err,
        dependency_changes::Error::ManifestParseError { ref path, .. } if path == "packages/app/package.json"
    ));

    assert!(Manifest::parse("package.json", "[1, 2]").is_err());
}
