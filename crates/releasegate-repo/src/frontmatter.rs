use anyhow::{Context, anyhow};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").expect("static regex")
});

/// YAML frontmatter of a markdown file. `Ok(None)` when the file does not open one.
pub fn parse_frontmatter(content: &str) -> anyhow::Result<Option<Mapping>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if !content.starts_with("---") {
        return Ok(None);
    }
    let captures = FRONTMATTER
        .captures(content)
        .ok_or_else(|| anyhow!("frontmatter is not closed"))?;
    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    if yaml.trim().is_empty() {
        return Ok(Some(Mapping::new()));
    }
    match serde_yaml::from_str::<Value>(yaml).context("frontmatter is not valid YAML")? {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(Some(Mapping::new())),
        _ => Err(anyhow!("frontmatter is not a YAML mapping")),
    }
}

/// Require frontmatter with non-empty `name` and `description` strings.
pub fn require_identity(content: &str) -> anyhow::Result<()> {
    let map = parse_frontmatter(content)?.ok_or_else(|| anyhow!("no frontmatter"))?;
    let missing: Vec<&str> = ["name", "description"]
        .into_iter()
        .filter(|key| {
            map.get(*key)
                .and_then(Value::as_str)
                .is_none_or(|v| v.trim().is_empty())
        })
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("missing {}", missing.join(", ")))
    }
}
