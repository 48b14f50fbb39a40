use camino::Utf8Path;
use regex::Regex;
use releasegate_types::ProjectType;
use std::sync::LazyLock;
use toml_edit::DocumentMut;

static COV_FAIL_UNDER_OPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--cov-fail-under[= ](\d+(?:\.\d+)?)").expect("static regex"));

/// Coverage threshold declared in the project's own tooling config.
///
/// Python: `[tool.coverage.report] fail_under` or `--cov-fail-under` in pytest `addopts`
/// (`pyproject.toml`), `[coverage:report] fail_under` (`setup.cfg`), `[report] fail_under`
/// (`.coveragerc`). Node: `jest.coverageThreshold.global.lines` in `package.json`.
/// Unreadable files and values outside 0..=100 are ignored.
pub fn native_coverage_threshold(root: &Utf8Path, project_type: ProjectType) -> Option<f64> {
    let found = match project_type {
        ProjectType::Python => python_threshold(root),
        ProjectType::NodeJs => jest_threshold(root),
        _ => None,
    };
    found.filter(|v| v.is_finite() && (0.0..=100.0).contains(v))
}

fn python_threshold(root: &Utf8Path) -> Option<f64> {
    read(root, "pyproject.toml")
        .and_then(|text| pyproject_threshold(&text))
        .or_else(|| read(root, "setup.cfg").and_then(|t| ini_value(&t, "coverage:report", "fail_under")))
        .or_else(|| read(root, ".coveragerc").and_then(|t| ini_value(&t, "report", "fail_under")))
}

fn pyproject_threshold(text: &str) -> Option<f64> {
    let doc = text.parse::<DocumentMut>().ok()?;
    let tool = doc.get("tool")?;
    let fail_under = tool
        .get("coverage")
        .and_then(|c| c.get("report"))
        .and_then(|r| r.get("fail_under"))
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)));
    fail_under.or_else(|| {
        let addopts = tool
            .get("pytest")
            .and_then(|p| p.get("ini_options"))
            .and_then(|o| o.get("addopts"))?;
        let joined = match addopts.as_array() {
            Some(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            None => addopts.as_str()?.to_string(),
        };
        COV_FAIL_UNDER_OPT
            .captures(&joined)
            .and_then(|c| c[1].parse().ok())
    })
}

/// Minimal INI lookup: `key = value` inside `[section]`.
fn ini_value(text: &str, section: &str, key: &str) -> Option<f64> {
    let mut current = "";
    for line in text.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = name.trim();
            continue;
        }
        if current != section {
            continue;
        }
        if let Some((k, v)) = line.split_once(['=', ':'])
            && k.trim() == key
        {
            return v.trim().parse().ok();
        }
    }
    None
}

fn jest_threshold(root: &Utf8Path) -> Option<f64> {
    let text = read(root, "package.json")?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    value
        .pointer("/jest/coverageThreshold/global/lines")
        .and_then(|v| v.as_f64())
}

fn read(root: &Utf8Path, name: &str) -> Option<String> {
    std::fs::read_to_string(root.join(name)).ok()
}
