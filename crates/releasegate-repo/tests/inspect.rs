//! Integration tests for detection and structural inspections against fixture trees.

use camino::Utf8PathBuf;
use releasegate_domain::model::Inspection;
use releasegate_repo::{detect_project_type, native_coverage_threshold, run_inspection};
use releasegate_types::{CheckStatus, ProjectType};
use std::path::PathBuf;

/// Get the path to the test fixtures directory (repo root / tests / fixtures).
fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/releasegate-repo -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("releasegate-repo should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("tests").join("fixtures"))
        .expect("fixture path should be valid UTF-8")
}

fn inspect(fixture: &str, inspection: Inspection) -> releasegate_domain::model::Outcome {
    let root = fixtures_dir().join(fixture);
    let ty = detect_project_type(&root);
    run_inspection(&root, ty, inspection).expect("inspection should complete")
}

#[test]
fn fixtures_detect_as_expected() {
    let cases = [
        ("plugin_ready", ProjectType::ClaudePlugin),
        ("plugin_bad_manifest", ProjectType::ClaudePlugin),
        ("plugin_and_node", ProjectType::ClaudePlugin),
        ("python_project", ProjectType::Python),
        ("node_project", ProjectType::NodeJs),
        ("go_project", ProjectType::Go),
        ("rust_project", ProjectType::Rust),
        ("generic_project", ProjectType::Generic),
    ];
    for (fixture, expected) in cases {
        assert_eq!(
            detect_project_type(&fixtures_dir().join(fixture)),
            expected,
            "fixture {fixture}"
        );
    }
}

#[test]
fn ready_plugin_passes_structural_checks() {
    for inspection in [
        Inspection::PluginManifest,
        Inspection::Agents,
        Inspection::Skills,
        Inspection::Commands,
        Inspection::Changelog,
        Inspection::CiConfig,
    ] {
        let outcome = inspect("plugin_ready", inspection);
        assert_eq!(
            outcome.status,
            CheckStatus::Pass,
            "{inspection:?}: {}",
            outcome.message
        );
    }
}

#[test]
fn agents_count_is_reported() {
    let outcome = inspect("plugin_ready", Inspection::Agents);
    assert_eq!(outcome.message, "Found 2 agents, all valid");
    assert_eq!(outcome.data["total"], 2);
}

#[test]
fn missing_manifest_fields_are_named() {
    let outcome = inspect("plugin_bad_manifest", Inspection::PluginManifest);
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert_eq!(outcome.message, "Missing required fields: version, description");
}

#[test]
fn malformed_agents_are_listed_in_detail() {
    let outcome = inspect("plugin_bad_manifest", Inspection::Agents);
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert_eq!(outcome.message, "2 of 2 agents are invalid");
    let detail = outcome.detail.expect("detail lists files");
    assert!(detail.contains("agents/broken.md: missing description"));
    assert!(detail.contains("agents/unclosed.md: frontmatter is not closed"));
}

#[test]
fn absent_component_directories_skip() {
    assert_eq!(
        inspect("plugin_bad_manifest", Inspection::Skills).status,
        CheckStatus::Skip
    );
    assert_eq!(
        inspect("plugin_bad_manifest", Inspection::Commands).status,
        CheckStatus::Skip
    );
}

#[test]
fn changelog_without_unreleased_fails() {
    let outcome = inspect("plugin_missing_unreleased", Inspection::Changelog);
    assert_eq!(outcome.status, CheckStatus::Fail);
    assert!(outcome.message.contains("[Unreleased]"));
}

#[test]
fn ecosystem_manifests_pass() {
    let cases = [
        ("python_project", "pyproject.toml declares sample-app 0.3.0"),
        ("node_project", "package.json declares sample-web 2.0.1"),
        ("go_project", "go.mod declares module example.com/sample"),
        ("rust_project", "Cargo.toml declares sample-crate 0.4.2"),
    ];
    for (fixture, message) in cases {
        let outcome = inspect(fixture, Inspection::Manifest);
        assert_eq!(outcome.status, CheckStatus::Pass, "{fixture}");
        assert_eq!(outcome.message, message);
    }
}

#[test]
fn ci_locations_are_found() {
    assert_eq!(
        inspect("python_project", Inspection::CiConfig).message,
        "Found CI config: .gitlab-ci.yml"
    );
    assert_eq!(
        inspect("go_project", Inspection::CiConfig).message,
        "Found CI config: Jenkinsfile"
    );
    assert_eq!(
        inspect("generic_project", Inspection::CiConfig).status,
        CheckStatus::Warn
    );
}

#[test]
fn native_thresholds_from_fixtures() {
    let root = fixtures_dir();
    assert_eq!(
        native_coverage_threshold(&root.join("python_project"), ProjectType::Python),
        Some(90.0)
    );
    assert_eq!(
        native_coverage_threshold(&root.join("node_project"), ProjectType::NodeJs),
        Some(80.0)
    );
}
