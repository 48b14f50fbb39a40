use super::relative;
use crate::frontmatter::{parse_frontmatter, require_identity};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use releasegate_domain::model::Outcome;
use serde_json::{Value, json};
use walkdir::WalkDir;

const MANIFEST_CANDIDATES: &[&str] = &[".claude-plugin/plugin.json", "plugin.json"];
const REQUIRED_FIELDS: &[&str] = &["name", "version", "description"];

pub fn plugin_manifest(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let Some(path) = MANIFEST_CANDIDATES
        .iter()
        .map(|c| root.join(c))
        .find(|p| p.is_file())
    else {
        return Ok(Outcome::fail("plugin.json not found"));
    };
    let rel = relative(root, &path);
    let text = std::fs::read_to_string(&path).with_context(|| format!("read {rel}"))?;

    let value: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => return Ok(Outcome::fail(format!("Invalid JSON in {rel}: {e}"))),
    };
    let Some(obj) = value.as_object() else {
        return Ok(Outcome::fail(format!("{rel} must contain a JSON object")));
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| {
            obj.get(*f)
                .and_then(Value::as_str)
                .is_none_or(|s| s.trim().is_empty())
        })
        .collect();
    if !missing.is_empty() {
        return Ok(Outcome::fail(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let name = obj.get("name").and_then(Value::as_str).unwrap_or_default();
    let version = obj.get("version").and_then(Value::as_str).unwrap_or_default();
    Ok(
        Outcome::pass(format!("Valid {rel} ({name} v{version})"))
            .with_data(json!({ "name": name, "version": version })),
    )
}

pub fn agents(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let dir = root.join("agents");
    if !dir.is_dir() {
        return Ok(Outcome::skip("No agents directory"));
    }
    let files = markdown_files(&dir)?;
    if files.is_empty() {
        return Ok(Outcome::warn("agents directory contains no agent files"));
    }

    let mut invalid = Vec::new();
    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("read {}", relative(root, file)))?;
        if let Err(e) = require_identity(&text) {
            invalid.push(format!("{}: {e}", relative(root, file)));
        }
    }
    Ok(component_outcome("agents", files.len(), invalid))
}

pub fn skills(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let dir = root.join("skills");
    if !dir.is_dir() {
        return Ok(Outcome::skip("No skills directory"));
    }
    let mut skill_dirs: Vec<Utf8PathBuf> = Vec::new();
    for entry in dir.read_dir_utf8().with_context(|| format!("list {}", relative(root, &dir)))? {
        let entry = entry.with_context(|| format!("list {}", relative(root, &dir)))?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            skill_dirs.push(entry.into_path());
        }
    }
    skill_dirs.sort();
    if skill_dirs.is_empty() {
        return Ok(Outcome::warn("skills directory contains no skill directories"));
    }

    let mut invalid = Vec::new();
    for skill in &skill_dirs {
        let manifest = skill.join("SKILL.md");
        if !manifest.is_file() {
            invalid.push(format!("{}: missing SKILL.md", relative(root, skill)));
            continue;
        }
        let text = std::fs::read_to_string(&manifest)
            .with_context(|| format!("read {}", relative(root, &manifest)))?;
        if let Err(e) = require_identity(&text) {
            invalid.push(format!("{}: {e}", relative(root, &manifest)));
        }
    }
    Ok(component_outcome("skills", skill_dirs.len(), invalid))
}

pub fn commands(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let dir = root.join("commands");
    if !dir.is_dir() {
        return Ok(Outcome::skip("No commands directory"));
    }
    let files = markdown_files(&dir)?;
    if files.is_empty() {
        return Ok(Outcome::warn("commands directory contains no command files"));
    }

    let mut invalid = Vec::new();
    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("read {}", relative(root, file)))?;
        if let Err(e) = parse_frontmatter(&text) {
            invalid.push(format!("{}: {e}", relative(root, file)));
        }
    }
    Ok(component_outcome("commands", files.len(), invalid))
}

fn component_outcome(kind: &str, total: usize, invalid: Vec<String>) -> Outcome {
    let data = json!({ "total": total, "invalid": invalid.len() });
    if invalid.is_empty() {
        Outcome::pass(format!("Found {total} {kind}, all valid")).with_data(data)
    } else {
        Outcome::fail(format!("{} of {total} {kind} are invalid", invalid.len()))
            .with_detail(invalid.join("\n"))
            .with_data(data)
    }
}

/// `*.md` files below `dir`, sorted by path.
fn markdown_files(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            continue;
        };
        if path.extension() == Some("md") {
            out.push(path);
        }
    }
    Ok(out)
}
