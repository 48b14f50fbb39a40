//! Change-set parsing and classification for the breaking-change scan.
//!
//! Input is `git diff --name-status -M --relative <tag>` output plus the top-level entries that
//! existed at the tag. Output is a [`ChangeSummary`] from which the semver bump follows.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use releasegate_types::{BreakingChange, BreakingKind, RepoPath, SemverBump};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed { to: RepoPath },
    Copied { to: RepoPath },
    TypeChanged,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEntry {
    pub kind: ChangeKind,
    pub path: RepoPath,
}

/// Parse `--name-status` output. Malformed lines are skipped, never fatal.
pub fn parse_name_status(text: &str) -> Vec<ChangeEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ChangeEntry> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }
    let mut parts = line.split('\t');
    let status = parts.next()?.trim();
    let first = parts.next().filter(|p| !p.is_empty())?;
    let second = parts.next().filter(|p| !p.is_empty());

    let kind = match status.chars().next()? {
        'A' => ChangeKind::Added,
        'M' => ChangeKind::Modified,
        'D' => ChangeKind::Deleted,
        'T' => ChangeKind::TypeChanged,
        'R' => ChangeKind::Renamed {
            to: RepoPath::new(unquote_path(second?)),
        },
        'C' => ChangeKind::Copied {
            to: RepoPath::new(unquote_path(second?)),
        },
        _ => ChangeKind::Unknown,
    };

    Some(ChangeEntry {
        kind,
        path: RepoPath::new(unquote_path(first)),
    })
}

/// Undo git's C-style path quoting (`"d\303\251j\303\240.md"`).
///
/// Unquoted input is returned as is. Octal escapes are raw bytes, decoded as UTF-8.
pub fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
        return raw.to_string();
    };
    let src = inner.as_bytes();
    let mut bytes = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i] != b'\\' {
            bytes.push(src[i]);
            i += 1;
            continue;
        }
        let Some(&next) = src.get(i + 1) else {
            bytes.push(b'\\');
            break;
        };
        let (byte, used) = match next {
            b'a' => (0x07, 2),
            b'b' => (0x08, 2),
            b'f' => (0x0c, 2),
            b'n' => (b'\n', 2),
            b'r' => (b'\r', 2),
            b't' => (b'\t', 2),
            b'v' => (0x0b, 2),
            b'0'..=b'7' => {
                let digits = src[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|d| (b'0'..=b'7').contains(*d))
                    .count();
                let value = src[i + 1..i + 1 + digits]
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                (u8::try_from(value).unwrap_or(b'?'), 1 + digits)
            }
            other => (other, 2),
        };
        bytes.push(byte);
        i += used;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "testdata", "spec", "specs"];

/// Dotfiles and dot-directories anywhere in the path.
pub fn is_dotfile(path: &RepoPath) -> bool {
    path.components().any(|c| c.starts_with('.') && c != "." && c != "..")
}

/// Test sources by directory or file naming convention.
pub fn is_test_path(path: &RepoPath) -> bool {
    if path.top_level().starts_with("test") {
        return true;
    }
    let mut components: Vec<&str> = path.components().collect();
    let file = components.pop().unwrap_or_default();
    if components.iter().any(|c| TEST_DIRS.contains(c)) {
        return true;
    }
    (file.starts_with("test_") && file.ends_with(".py"))
        || file.ends_with("_test.py")
        || file.ends_with("_test.go")
        || file.contains(".test.")
        || file.contains(".spec.")
}

/// Paths excluded from breaking/addition signals: tests, dotfiles, configured globs.
#[derive(Clone, Debug, Default)]
pub struct PathFilter {
    ignore: Option<GlobSet>,
}

impl PathFilter {
    pub fn new(patterns: &[String]) -> anyhow::Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(
                Glob::new(pattern).with_context(|| format!("invalid ignore glob: {pattern}"))?,
            );
        }
        Ok(Self {
            ignore: Some(builder.build().context("compile ignore globset")?),
        })
    }

    pub fn is_exempt(&self, path: &RepoPath) -> bool {
        is_dotfile(path)
            || is_test_path(path)
            || self
                .ignore
                .as_ref()
                .is_some_and(|set| set.is_match(path.as_str()))
    }
}

/// Classified change set since the last release tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub base_ref: String,
    /// Number of diff entries, exempt paths included.
    pub total_changes: usize,
    pub breaking: Vec<BreakingChange>,
    /// Top-level names that did not exist at the base ref.
    pub new_top_level: Vec<String>,
}

impl ChangeSummary {
    pub fn semver(&self) -> SemverBump {
        if !self.breaking.is_empty() {
            SemverBump::Major
        } else if !self.new_top_level.is_empty() {
            SemverBump::Minor
        } else {
            SemverBump::Patch
        }
    }
}

pub fn summarize(
    base_ref: &str,
    entries: &[ChangeEntry],
    top_level_at_base: &BTreeSet<String>,
    filter: &PathFilter,
) -> ChangeSummary {
    let mut breaking = Vec::new();
    let mut new_top_level = BTreeSet::new();

    for entry in entries {
        match &entry.kind {
            ChangeKind::Deleted if !filter.is_exempt(&entry.path) => {
                breaking.push(BreakingChange {
                    kind: BreakingKind::Deleted,
                    path: entry.path.clone(),
                    renamed_to: None,
                });
            }
            ChangeKind::Renamed { to } if !filter.is_exempt(&entry.path) => {
                breaking.push(BreakingChange {
                    kind: BreakingKind::Renamed,
                    path: entry.path.clone(),
                    renamed_to: Some(to.clone()),
                });
            }
            ChangeKind::Added | ChangeKind::Copied { .. } => {
                let path = match &entry.kind {
                    ChangeKind::Copied { to } => to,
                    _ => &entry.path,
                };
                let top = path.top_level();
                if !filter.is_exempt(path) && !top_level_at_base.contains(top) {
                    new_top_level.insert(top.to_string());
                }
            }
            _ => {}
        }
    }

    breaking.sort();

    ChangeSummary {
        base_ref: base_ref.to_string(),
        total_changes: entries.len(),
        breaking,
        new_top_level: new_top_level.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_every_status_letter() {
        let out = "A\tnew.go\nM\tmain.go\nD\told.go\nR087\ta.go\tb.go\nC100\tx.go\ty.go\nT\tlink\n";
        let entries = parse_name_status(out);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].kind, ChangeKind::Added);
        assert_eq!(entries[2].kind, ChangeKind::Deleted);
        assert_eq!(
            entries[3].kind,
            ChangeKind::Renamed {
                to: RepoPath::new("b.go")
            }
        );
        assert_eq!(entries[5].kind, ChangeKind::TypeChanged);
    }

    #[test]
    fn skips_malformed_lines() {
        let out = "\n\nD\nR100\tonly-old\nM\tok.txt\r\n";
        let entries = parse_name_status(out);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path.as_str(), "ok.txt");
    }

    #[test]
    fn quoted_paths_are_decoded() {
        let out = "D\t\"d\\303\\251j\\303\\240.md\"\nR100\t\"a\\\"b.txt\"\t\"tab\\there.txt\"\n";
        let entries = parse_name_status(out);
        assert_eq!(entries[0].path.as_str(), "déjà.md");
        assert_eq!(entries[1].path.as_str(), "a\"b.txt");
        assert_eq!(
            entries[1].kind,
            ChangeKind::Renamed {
                to: RepoPath::new("tab\there.txt")
            }
        );
    }

    #[test]
    fn unquoted_paths_pass_through() {
        assert_eq!(unquote_path("déjà.md"), "déjà.md");
        assert_eq!(unquote_path("\"unterminated"), "\"unterminated");
        assert_eq!(unquote_path("\"\\101\\\\\""), "A\\");
    }

    #[test]
    fn surrounding_spaces_in_paths_are_kept() {
        let entries = parse_name_status("D\t docs/old.md \n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path.as_str(), " docs/old.md ");
    }

    #[test]
    fn dotfiles_and_tests_are_exempt() {
        let filter = PathFilter::default();
        for p in [
            ".github/workflows/ci.yml",
            "src/.hidden",
            "tests/integration.rs",
            "testing/helpers.py",
            "pkg/api/handler_test.go",
            "app/test_models.py",
            "web/button.spec.ts",
            "src/__tests__/app.js",
        ] {
            assert!(filter.is_exempt(&RepoPath::new(p)), "{p} should be exempt");
        }
        for p in ["src/lib.rs", "pkg/api/handler.go", "agents/reviewer.md", "contest.py"] {
            assert!(!filter.is_exempt(&RepoPath::new(p)), "{p} should not be exempt");
        }
    }

    #[test]
    fn configured_globs_extend_the_exemptions() {
        let filter = PathFilter::new(&["docs/**".to_string()]).expect("valid glob");
        assert!(filter.is_exempt(&RepoPath::new("docs/guide.md")));
        assert!(!filter.is_exempt(&RepoPath::new("src/guide.md")));
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let err = PathFilter::new(&["[".to_string()]).unwrap_err();
        assert!(format!("{err:#}").contains("invalid ignore glob"));
    }

    #[test]
    fn deletion_of_public_path_is_breaking() {
        let entries = parse_name_status("D\tpkg/api.go\nM\tREADME.md\n");
        let summary = summarize("v1.0.0", &entries, &base(&["pkg", "README.md"]), &PathFilter::default());
        assert_eq!(summary.breaking.len(), 1);
        assert_eq!(summary.breaking[0].to_string(), "DELETED: pkg/api.go");
        assert_eq!(summary.semver(), SemverBump::Major);
    }

    #[test]
    fn deleted_test_file_is_not_breaking() {
        let entries = parse_name_status("D\ttests/old.rs\nD\t.travis.yml\n");
        let summary = summarize("v1", &entries, &base(&["tests"]), &PathFilter::default());
        assert!(summary.breaking.is_empty());
        assert_eq!(summary.semver(), SemverBump::Patch);
    }

    #[test]
    fn new_top_level_directory_is_minor() {
        let entries = parse_name_status("A\tplugins/new.py\nA\tsrc/extra.py\n");
        let summary = summarize("v1", &entries, &base(&["src"]), &PathFilter::default());
        assert_eq!(summary.new_top_level, vec!["plugins".to_string()]);
        assert_eq!(summary.semver(), SemverBump::Minor);
    }

    #[test]
    fn rename_beats_addition() {
        let entries = parse_name_status("A\tnewdir/x.go\nR100\tapi.go\tapi_v2.go\n");
        let summary = summarize("v1", &entries, &base(&["api.go"]), &PathFilter::default());
        assert_eq!(summary.semver(), SemverBump::Major);
        assert_eq!(summary.breaking[0].to_string(), "RENAMED: api.go -> api_v2.go");
    }

    #[test]
    fn empty_change_set_recommends_patch() {
        let summary = summarize("v1", &[], &base(&["src"]), &PathFilter::default());
        assert_eq!(summary.total_changes, 0);
        assert_eq!(summary.semver(), SemverBump::Patch);
    }
}
