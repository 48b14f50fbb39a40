use releasegate_types::{
    BreakingChange, BreakingKind, CheckResult, CheckStatus, ProjectType, RepoPath, SemverBump,
    ThresholdSource, ValidationReport, Verdict,
};

pub fn check(id: &str, status: CheckStatus, blocking: bool, message: &str) -> CheckResult {
    CheckResult {
        id: id.to_string(),
        status,
        blocking,
        message: message.to_string(),
        detail: None,
        data: serde_json::Value::Null,
    }
}

pub fn report(checks: Vec<CheckResult>, verdict: Verdict) -> ValidationReport {
    ValidationReport {
        project_type: ProjectType::Go,
        project_path: "/work/sample".to_string(),
        checks,
        verdict,
        semver: SemverBump::Patch,
        breaking_changes: Vec::new(),
        coverage_threshold: 95.0,
        threshold_source: ThresholdSource::Default,
    }
}

pub fn deleted(path: &str) -> BreakingChange {
    BreakingChange {
        kind: BreakingKind::Deleted,
        path: RepoPath::new(path),
        renamed_to: None,
    }
}
