use anyhow::Context;
use camino::Utf8Path;
use releasegate_domain::model::Outcome;
use releasegate_types::ProjectType;
use serde_json::json;
use toml_edit::{DocumentMut, Item};

pub fn manifest(root: &Utf8Path, project_type: ProjectType) -> anyhow::Result<Outcome> {
    match project_type {
        ProjectType::Python => python(root),
        ProjectType::NodeJs => node(root),
        ProjectType::Go => go(root),
        ProjectType::Rust => rust(root),
        ProjectType::ClaudePlugin | ProjectType::Generic => Ok(Outcome::skip(format!(
            "No package manifest for {project_type} projects"
        ))),
    }
}

fn read(root: &Utf8Path, name: &str) -> anyhow::Result<Option<String>> {
    let path = root.join(name);
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .with_context(|| format!("read {name}"))
}

fn parse_toml(name: &str, text: &str) -> Result<DocumentMut, Outcome> {
    text.parse::<DocumentMut>()
        .map_err(|e| Outcome::fail(format!("{name} is not valid TOML")).with_detail(e.to_string()))
}

fn str_field(table: &Item, key: &str) -> Option<String> {
    table
        .get(key)
        .and_then(Item::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn identity(name: String, version: &str, file: &str) -> Outcome {
    Outcome::pass(format!("{file} declares {name} {version}"))
        .with_data(json!({ "name": name, "version": version }))
}

fn python(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let Some(text) = read(root, "pyproject.toml")? else {
        if root.join("setup.py").is_file() {
            return Ok(Outcome::warn(
                "Only setup.py found; declare metadata in pyproject.toml",
            ));
        }
        return Ok(Outcome::fail("No pyproject.toml or setup.py found"));
    };
    let doc = match parse_toml("pyproject.toml", &text) {
        Ok(doc) => doc,
        Err(outcome) => return Ok(outcome),
    };

    if let Some(project) = doc.get("project") {
        let name = str_field(project, "name");
        let dynamic_version = project
            .get("dynamic")
            .and_then(Item::as_array)
            .is_some_and(|a| a.iter().any(|v| v.as_str() == Some("version")));
        let version = str_field(project, "version")
            .or_else(|| dynamic_version.then(|| "(dynamic)".to_string()));
        return Ok(match (name, version) {
            (Some(name), Some(version)) => identity(name, &version, "pyproject.toml"),
            (name, version) => missing("pyproject.toml [project]", name.is_none(), version.is_none()),
        });
    }

    if let Some(poetry) = doc.get("tool").and_then(|t| t.get("poetry")) {
        return Ok(match (str_field(poetry, "name"), str_field(poetry, "version")) {
            (Some(name), Some(version)) => identity(name, &version, "pyproject.toml"),
            (name, version) => missing(
                "pyproject.toml [tool.poetry]",
                name.is_none(),
                version.is_none(),
            ),
        });
    }

    if root.join("setup.py").is_file() {
        return Ok(Outcome::warn(
            "pyproject.toml has no [project] table; metadata lives in setup.py",
        ));
    }
    Ok(Outcome::fail(
        "pyproject.toml declares no [project] or [tool.poetry] metadata",
    ))
}

fn missing(place: &str, name: bool, version: bool) -> Outcome {
    let fields: Vec<&str> = [(name, "name"), (version, "version")]
        .into_iter()
        .filter_map(|(absent, field)| absent.then_some(field))
        .collect();
    Outcome::fail(format!("{place} is missing: {}", fields.join(", ")))
}

fn node(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let Some(text) = read(root, "package.json")? else {
        return Ok(Outcome::fail("package.json not found"));
    };
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => return Ok(Outcome::fail(format!("Invalid JSON in package.json: {e}"))),
    };
    let field = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };
    Ok(match (field("name"), field("version")) {
        (Some(name), Some(version)) => identity(name, &version, "package.json"),
        (name, version) => missing("package.json", name.is_none(), version.is_none()),
    })
}

fn go(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let Some(text) = read(root, "go.mod")? else {
        return Ok(Outcome::fail("go.mod not found"));
    };
    let module = text
        .lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("module "))
        .map(|m| m.trim().trim_matches('"'))
        .filter(|m| !m.is_empty());
    Ok(match module {
        Some(module) => Outcome::pass(format!("go.mod declares module {module}"))
            .with_data(json!({ "module": module })),
        None => Outcome::fail("go.mod has no module directive"),
    })
}

fn rust(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let Some(text) = read(root, "Cargo.toml")? else {
        return Ok(Outcome::fail("Cargo.toml not found"));
    };
    let doc = match parse_toml("Cargo.toml", &text) {
        Ok(doc) => doc,
        Err(outcome) => return Ok(outcome),
    };

    if let Some(package) = doc.get("package") {
        let name = str_field(package, "name");
        let version = str_field(package, "version").or_else(|| {
            package
                .get("version")
                .and_then(|v| v.get("workspace"))
                .and_then(Item::as_bool)
                .filter(|w| *w)
                .map(|_| "(workspace)".to_string())
        });
        return Ok(match (name, version) {
            (Some(name), Some(version)) => identity(name, &version, "Cargo.toml"),
            (name, version) => missing("Cargo.toml [package]", name.is_none(), version.is_none()),
        });
    }

    if let Some(workspace) = doc.get("workspace") {
        let members = workspace
            .get("members")
            .and_then(Item::as_array)
            .map(|a| a.len())
            .unwrap_or_default();
        return Ok(
            Outcome::pass(format!("Cargo.toml is a virtual workspace ({members} member patterns)"))
                .with_data(json!({ "members": members })),
        );
    }

    Ok(Outcome::fail("Cargo.toml has neither [package] nor [workspace]"))
}
