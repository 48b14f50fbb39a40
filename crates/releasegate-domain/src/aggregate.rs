use crate::changes::ChangeSummary;
use crate::model::Outcome;
use crate::policy::EffectiveConfig;
use releasegate_types::{
    CheckResult, CheckStatus, ProjectType, SemverBump, ValidationReport, Verdict,
};

/// Apply blocking policy to a raw outcome. A failed advisory check is reported as a warning.
pub fn classify(id: &str, blocking: bool, outcome: Outcome) -> CheckResult {
    let status = match outcome.status {
        CheckStatus::Fail if !blocking => CheckStatus::Warn,
        other => other,
    };
    CheckResult {
        id: id.to_string(),
        status,
        blocking,
        message: outcome.message,
        detail: outcome.detail,
        data: outcome.data,
    }
}

/// Semver bump from the change scan. Without a scan the conservative answer is a patch.
pub fn recommend_semver(changes: Option<&ChangeSummary>) -> SemverBump {
    changes.map_or(SemverBump::Patch, ChangeSummary::semver)
}

pub fn aggregate(
    project_type: ProjectType,
    project_path: &str,
    checks: Vec<CheckResult>,
    changes: Option<&ChangeSummary>,
    cfg: &EffectiveConfig,
) -> ValidationReport {
    let verdict = if checks.iter().any(CheckResult::blocks_release) {
        Verdict::NotReady
    } else {
        Verdict::Ready
    };

    ValidationReport {
        project_type,
        project_path: project_path.to_string(),
        checks,
        verdict,
        semver: recommend_semver(changes),
        breaking_changes: changes.map(|c| c.breaking.clone()).unwrap_or_default(),
        coverage_threshold: cfg.coverage_threshold,
        threshold_source: cfg.threshold_source,
    }
}
