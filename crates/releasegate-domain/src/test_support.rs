use crate::changes::{ChangeSummary, PathFilter, parse_name_status, summarize};
use releasegate_types::{CheckResult, CheckStatus};
use std::collections::BTreeSet;

pub fn result(id: &str, status: CheckStatus, blocking: bool) -> CheckResult {
    CheckResult {
        id: id.to_string(),
        status,
        blocking,
        message: format!("{id} {}", status.as_str()),
        detail: None,
        data: serde_json::Value::Null,
    }
}

/// Summarize name-status lines against the given top-level names at the tag.
pub fn summary(lines: &[&str], top_level: &[&str]) -> ChangeSummary {
    let entries = parse_name_status(&lines.join("\n"));
    let base: BTreeSet<String> = top_level.iter().map(|s| s.to_string()).collect();
    summarize("v1.0.0", &entries, &base, &PathFilter::default())
}
