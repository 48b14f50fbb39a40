use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical repo-relative path used in change sets and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - whitespace is part of the name and never trimmed
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First path component (`src` for `src/lib.rs`).
    pub fn top_level(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_leading_dot_slash() {
        assert_eq!(RepoPath::new("./src\\lib.rs").as_str(), "src/lib.rs");
        assert_eq!(RepoPath::new("").as_str(), ".");
    }

    #[test]
    fn exposes_top_level_and_components() {
        let p = RepoPath::new("pkg/api/handler.go");
        assert_eq!(p.top_level(), "pkg");
        assert_eq!(p.components().count(), 3);
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        assert_eq!(RepoPath::new(" notes.md ").as_str(), " notes.md ");
        assert_eq!(RepoPath::new(" notes.md ").top_level(), " notes.md ");
    }
}
