use crate::cache::CommandCache;
use crate::process::ProcessError;
use releasegate_domain::changes::{
    ChangeSummary, PathFilter, parse_name_status, summarize, unquote_path,
};
use std::collections::BTreeSet;
use tracing::debug;

pub(crate) enum ScanOutcome {
    Scanned(ChangeSummary),
    /// The scan could not run; the message says why.
    Unavailable(String),
}

/// Diff the working tree against the most recent tag.
///
/// Both the diff and the tag listing are limited to the project directory and report
/// paths relative to it, so a project nested inside a larger repository is scanned alone.
pub(crate) fn scan_changes(cache: &mut CommandCache<'_>, filter: &PathFilter) -> ScanOutcome {
    let tag = match &*cache.run(&["git", "describe", "--tags", "--abbrev=0"]) {
        Ok(out) if out.success() => out.stdout.trim().to_string(),
        Ok(_) => return ScanOutcome::Unavailable("No previous tags found".to_string()),
        Err(ProcessError::NotFound { .. }) => {
            return ScanOutcome::Unavailable("git is not installed".to_string());
        }
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };
    if tag.is_empty() {
        return ScanOutcome::Unavailable("No previous tags found".to_string());
    }
    debug!(%tag, "scanning changes since tag");

    let diff = match &*cache.run(&[
        "git",
        "-c",
        "core.quotePath=false",
        "diff",
        "--name-status",
        "-M",
        "--relative",
        tag.as_str(),
    ]) {
        Ok(out) if out.success() => out.stdout.clone(),
        Ok(out) => {
            return ScanOutcome::Unavailable(format!(
                "git diff against {tag} failed: {}",
                out.stderr.trim()
            ));
        }
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };

    // ls-tree lists the cwd subtree with cwd-relative names unless --full-tree is given.
    let listing = cache.run(&[
        "git",
        "-c",
        "core.quotePath=false",
        "ls-tree",
        "--name-only",
        tag.as_str(),
    ]);
    let top_level: BTreeSet<String> = match &*listing {
        Ok(out) if out.success() => out
            .stdout
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .map(unquote_path)
            .collect(),
        Ok(out) => {
            return ScanOutcome::Unavailable(format!(
                "git ls-tree {tag} failed: {}",
                out.stderr.trim()
            ));
        }
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };

    let entries = parse_name_status(&diff);
    ScanOutcome::Scanned(summarize(&tag, &entries, &top_level, filter))
}
