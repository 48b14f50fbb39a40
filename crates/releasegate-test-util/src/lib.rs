//! Shared test utilities for the releasegate workspace.
//!
//! Used by integration tests of several crates and by `xtask`, so it lives in its own
//! crate rather than behind `#[cfg(test)]`.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Root-only, when the root looks like a report envelope (`schema`, `tool`, `run`,
/// `report`): `tool.version` becomes `"__VERSION__"` and `report.project_path` becomes
/// `"__PROJECT_PATH__"`.
///
/// Recursive: `started_at`, `finished_at` and `duration_ms` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "report"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope {
            if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
                && tool.contains_key("version")
            {
                tool.insert(
                    "version".to_string(),
                    Value::String("__VERSION__".to_string()),
                );
            }
            if let Some(report) = obj.get_mut("report").and_then(Value::as_object_mut)
                && report.contains_key("project_path")
            {
                report.insert(
                    "project_path".to_string(),
                    Value::String("__PROJECT_PATH__".to_string()),
                );
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Repository `tests/fixtures` directory.
pub fn fixtures_dir() -> Utf8PathBuf {
    // crates/releasegate-test-util -> crates -> repo root
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Utf8Path::parent)
        .map(|root| root.join("tests").join("fixtures"))
        .unwrap_or_else(|| Utf8PathBuf::from("tests/fixtures"))
}

/// Copy a fixture tree into a fresh temp dir, outside of any git checkout.
///
/// The returned `TempDir` must outlive the path.
pub fn copy_fixture(name: &str) -> (TempDir, Utf8PathBuf) {
    let source = fixtures_dir().join(name);
    assert!(source.is_dir(), "fixture {name} not found at {source}");

    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 temp dir");

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("walk fixture");
        let rel = entry
            .path()
            .strip_prefix(&source)
            .expect("entry below fixture root");
        let target = root.as_std_path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).expect("create fixture dir");
        } else {
            std::fs::copy(entry.path(), &target).expect("copy fixture file");
        }
    }
    (dir, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_envelope_fields() {
        let input = json!({
            "schema": "releasegate.report.v1",
            "tool": { "name": "releasegate", "version": "0.1.0" },
            "run": {
                "started_at": "2025-01-01T00:00:00Z",
                "finished_at": "2025-01-01T00:00:01Z",
                "duration_ms": 1000
            },
            "report": {
                "project_path": "/tmp/abc/plugin_ready",
                "checks": [
                    { "id": "tests", "data": { "name": "pkg", "version": "1.0.0" } }
                ]
            }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "releasegate");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["finished_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["duration_ms"], 0);
        assert_eq!(result["report"]["project_path"], "__PROJECT_PATH__");
        assert_eq!(result["report"]["checks"][0]["data"]["version"], "1.0.0");
    }

    #[test]
    fn root_without_envelope_keys_keeps_version() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "run": { "started_at": "2025-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);
        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
    }

    #[test]
    fn copies_fixture_tree() {
        let (_dir, root) = copy_fixture("plugin_ready");
        assert!(root.join(".claude-plugin/plugin.json").is_file());
        assert!(root.join("skills/release/SKILL.md").is_file());
        assert_eq!(root.file_name(), Some("plugin_ready"));
    }
}
