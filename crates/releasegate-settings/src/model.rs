use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `releasegate.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReleasegateConfigV1 {
    /// Optional schema string for tooling (`releasegate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Force a project type instead of detecting it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    /// Minimum coverage percentage, 0..=100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_threshold: Option<f64>,

    /// Bound for each external command, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,

    /// Bound for the whole run, in seconds. Checks not started in time are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,

    /// Treat every check as advisory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory_only: Option<bool>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override whether a failure blocks the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,

    /// Glob patterns excluded from the check (used by `breaking-changes`).
    #[serde(default)]
    pub ignore: Vec<String>,
}
