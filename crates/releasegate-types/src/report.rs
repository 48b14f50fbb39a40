use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Stable schema identifier for the JSON report envelope.
pub const SCHEMA_REPORT_V1: &str = "releasegate.report.v1";

/// Ecosystem a project root was classified into. Exactly one per run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ProjectType {
    #[serde(rename = "claude-plugin")]
    ClaudePlugin,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "nodejs")]
    NodeJs,
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "rust")]
    Rust,
    #[serde(rename = "generic")]
    Generic,
}

impl ProjectType {
    /// All variants, in detection precedence order (`Generic` last).
    pub const ALL: [ProjectType; 6] = [
        ProjectType::ClaudePlugin,
        ProjectType::Python,
        ProjectType::NodeJs,
        ProjectType::Go,
        ProjectType::Rust,
        ProjectType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::ClaudePlugin => "claude-plugin",
            ProjectType::Python => "python",
            ProjectType::NodeJs => "nodejs",
            ProjectType::Go => "go",
            ProjectType::Rust => "rust",
            ProjectType::Generic => "generic",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude-plugin" | "plugin" => Ok(ProjectType::ClaudePlugin),
            "python" => Ok(ProjectType::Python),
            "nodejs" | "node" => Ok(ProjectType::NodeJs),
            "go" | "golang" => Ok(ProjectType::Go),
            "rust" => Ok(ProjectType::Rust),
            "generic" => Ok(ProjectType::Generic),
            other => Err(format!(
                "unknown project type: {other} (expected claude-plugin|python|nodejs|go|rust|generic)"
            )),
        }
    }
}

/// Outcome classification for a single check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Skip,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
            CheckStatus::Warn => "warn",
            CheckStatus::Skip => "skip",
        }
    }
}

/// Result of running one check. Produced exactly once per check per run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    /// Stable check ID (see [`crate::ids`]). Unique within a report.
    pub id: String,
    pub status: CheckStatus,
    /// Whether a `fail` status of this check blocks the release.
    pub blocking: bool,
    pub message: String,

    /// Captured tool output or offending paths, truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Check-specific structured payload (coverage percentage, component counts, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

impl CheckResult {
    pub fn blocks_release(&self) -> bool {
        self.blocking && self.status == CheckStatus::Fail
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ready,
    NotReady,
}

/// Suggested version bump, ordered from weakest to strongest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SemverBump {
    None,
    Patch,
    Minor,
    Major,
}

impl SemverBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemverBump::None => "none",
            SemverBump::Patch => "patch",
            SemverBump::Minor => "minor",
            SemverBump::Major => "major",
        }
    }
}

impl fmt::Display for SemverBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BreakingKind {
    Deleted,
    Renamed,
}

/// A deleted or renamed public path since the last release tag.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct BreakingChange {
    pub kind: BreakingKind,
    pub path: RepoPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_to: Option<RepoPath>,
}

impl fmt::Display for BreakingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.renamed_to) {
            (BreakingKind::Renamed, Some(to)) => write!(f, "RENAMED: {} -> {}", self.path, to),
            (BreakingKind::Renamed, None) => write!(f, "RENAMED: {}", self.path),
            (BreakingKind::Deleted, _) => write!(f, "DELETED: {}", self.path),
        }
    }
}

/// Where the effective coverage threshold came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdSource {
    Cli,
    Environment,
    ConfigFile,
    ProjectNative,
    Default,
}

impl ThresholdSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdSource::Cli => "cli",
            ThresholdSource::Environment => "environment",
            ThresholdSource::ConfigFile => "config-file",
            ThresholdSource::ProjectNative => "project-native",
            ThresholdSource::Default => "default",
        }
    }
}

/// Aggregate of all check results for one run.
///
/// Contains no timestamps: two runs over an unchanged tree serialize identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub project_type: ProjectType,
    pub project_path: String,
    pub checks: Vec<CheckResult>,
    pub verdict: Verdict,
    pub semver: SemverBump,
    #[serde(default)]
    pub breaking_changes: Vec<BreakingChange>,
    pub coverage_threshold: f64,
    pub threshold_source: ThresholdSource,
}

impl ValidationReport {
    pub fn check(&self, id: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.id == id)
    }

    pub fn with_status(&self, status: CheckStatus) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(move |c| c.status == status)
    }

    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Warn)
    }

    pub fn blocking_failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.blocks_release())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,
}

/// JSON envelope around a report. `run` holds the only non-deterministic fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub report: ValidationReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_round_trips_through_its_name() {
        for ty in ProjectType::ALL {
            assert_eq!(ty.as_str().parse::<ProjectType>(), Ok(ty));
            let json = serde_json::to_string(&ty).expect("serialize");
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn project_type_rejects_unknown_names() {
        let err = "cobol".parse::<ProjectType>().unwrap_err();
        assert!(err.contains("cobol"));
    }

    #[test]
    fn semver_bumps_are_ordered_by_strength() {
        assert!(SemverBump::Major > SemverBump::Minor);
        assert!(SemverBump::Minor > SemverBump::Patch);
        assert!(SemverBump::Patch > SemverBump::None);
    }

    #[test]
    fn breaking_change_display_matches_report_lines() {
        let deleted = BreakingChange {
            kind: BreakingKind::Deleted,
            path: RepoPath::new("pkg/api.go"),
            renamed_to: None,
        };
        let renamed = BreakingChange {
            kind: BreakingKind::Renamed,
            path: RepoPath::new("a.py"),
            renamed_to: Some(RepoPath::new("b.py")),
        };
        assert_eq!(deleted.to_string(), "DELETED: pkg/api.go");
        assert_eq!(renamed.to_string(), "RENAMED: a.py -> b.py");
    }

    #[test]
    fn only_blocking_failures_block_release() {
        let mut result = CheckResult {
            id: "lint".to_string(),
            status: CheckStatus::Fail,
            blocking: false,
            message: "lint errors".to_string(),
            detail: None,
            data: JsonValue::Null,
        };
        assert!(!result.blocks_release());
        result.blocking = true;
        assert!(result.blocks_release());
        result.status = CheckStatus::Warn;
        assert!(!result.blocks_release());
    }
}
