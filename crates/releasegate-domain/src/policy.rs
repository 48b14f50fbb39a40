use crate::model::CheckSpec;
use releasegate_types::ThresholdSource;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 95.0;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 300;

/// Per-check override resolved from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
    /// `None` keeps the registry default.
    pub blocking: Option<bool>,
    /// Glob patterns the check should ignore (semantics are check-specific).
    pub ignore: Vec<String>,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            blocking: None,
            ignore: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub coverage_threshold: f64,
    pub threshold_source: ThresholdSource,
    /// Bound for every external command.
    pub command_timeout: Duration,
    /// Global bound for the whole run; remaining checks are skipped once exceeded.
    pub deadline: Option<Duration>,
    /// Demote every check to advisory.
    pub advisory_only: bool,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            threshold_source: ThresholdSource::Default,
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            deadline: None,
            advisory_only: false,
            checks: BTreeMap::new(),
        }
    }
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id)
    }

    pub fn is_enabled(&self, check_id: &str) -> bool {
        self.check_policy(check_id).is_none_or(|p| p.enabled)
    }

    pub fn is_blocking(&self, spec: &CheckSpec) -> bool {
        if self.advisory_only {
            return false;
        }
        self.check_policy(spec.id)
            .and_then(|p| p.blocking)
            .unwrap_or(spec.blocking)
    }

    pub fn ignore_patterns(&self, check_id: &str) -> &[String] {
        self.check_policy(check_id)
            .map(|p| p.ignore.as_slice())
            .unwrap_or_default()
    }
}
