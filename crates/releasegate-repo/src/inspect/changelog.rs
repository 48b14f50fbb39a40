use anyhow::Context;
use camino::Utf8Path;
use releasegate_domain::model::Outcome;
use serde_json::json;

pub fn changelog(root: &Utf8Path) -> anyhow::Result<Outcome> {
    let path = root.join("CHANGELOG.md");
    if !path.is_file() {
        return Ok(Outcome::fail("CHANGELOG.md not found"));
    }
    let text = std::fs::read_to_string(&path).context("read CHANGELOG.md")?;
    Ok(evaluate_changelog(&text))
}

/// An `## [Unreleased]` section must exist and hold at least one entry before the next
/// `## ` heading. Sub-headings such as `### Added` are not entries.
pub(crate) fn evaluate_changelog(text: &str) -> Outcome {
    let mut lines = text.lines();
    if !lines.any(is_unreleased_heading) {
        return Outcome::fail("CHANGELOG.md missing [Unreleased] section");
    }

    let entries = lines
        .take_while(|l| !l.starts_with("## "))
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .count();

    if entries == 0 {
        Outcome::warn("CHANGELOG.md [Unreleased] section is empty")
    } else {
        Outcome::pass(format!(
            "CHANGELOG.md has [Unreleased] section ({entries} entries)"
        ))
        .with_data(json!({ "unreleased_entries": entries }))
    }
}

const UNRELEASED_HEADING: &str = "## [Unreleased]";

fn is_unreleased_heading(line: &str) -> bool {
    line.trim_end() == UNRELEASED_HEADING
}
