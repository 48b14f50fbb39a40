//! The `validate` use case: detect, run checks, aggregate, wrap in an envelope.

use anyhow::Context;
use camino::Utf8Path;
use releasegate_runner::{ProcessRunner, RunContext, run_checks};
use releasegate_settings::{Environment, Overrides, ReleasegateConfigV1, ResolvedConfig};
use releasegate_types::{
    ProjectType, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;
use tracing::info;

pub struct ValidateInput<'a> {
    pub project_root: &'a Utf8Path,
    /// `releasegate.toml` contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub env: &'a Environment,
    pub process: &'a dyn ProcessRunner,
}

#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub envelope: ReportEnvelope,
    pub resolved_config: ResolvedConfig,
    pub project_type: ProjectType,
}

/// Validate a project root for release.
///
/// Errors only for problems that prevent running any check: a missing root or invalid
/// configuration. Check-level problems are reported inside the envelope.
pub fn run_validation(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = OffsetDateTime::now_utc();

    anyhow::ensure!(
        input.project_root.is_dir(),
        "project path not found: {}",
        input.project_root
    );

    let cfg = if input.config_text.trim().is_empty() {
        ReleasegateConfigV1::default()
    } else {
        releasegate_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = releasegate_settings::resolve_config(cfg, input.overrides, input.env)
        .context("resolve config")?;

    let project_type = resolved
        .project_type
        .unwrap_or_else(|| releasegate_repo::detect_project_type(input.project_root));
    let resolved = resolved.with_native_threshold(releasegate_repo::native_coverage_threshold(
        input.project_root,
        project_type,
    ));
    info!(
        %project_type,
        threshold = resolved.effective.coverage_threshold,
        threshold_source = resolved.effective.threshold_source.as_str(),
        "validating {}",
        input.project_root
    );

    let run = run_checks(&RunContext {
        root: input.project_root,
        project_type,
        config: &resolved.effective,
        process: input.process,
    });

    let report = releasegate_domain::aggregate(
        project_type,
        input.project_root.as_str(),
        run.results,
        run.changes.as_ref(),
        &resolved.effective,
    );

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    let envelope = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "releasegate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            finished_at,
            duration_ms,
        },
        report,
    };

    Ok(ValidateOutput {
        envelope,
        resolved_config: resolved,
        project_type,
    })
}

/// Map verdict to exit code: 0 = ready, 1 = not ready.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Ready => 0,
        Verdict::NotReady => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use releasegate_runner::fake::ScriptedRunner;

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Ready), 0);
        assert_eq!(verdict_exit_code(Verdict::NotReady), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = camino::Utf8Path::from_path(tmp.path()).expect("utf8 path").join("absent");
        let err = run_validation(ValidateInput {
            project_root: &root,
            config_text: "",
            overrides: Overrides::default(),
            env: &Environment::default(),
            process: &ScriptedRunner::new(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("project path not found"));
    }

    #[test]
    fn empty_directory_is_a_generic_project() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = camino::Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let out = run_validation(ValidateInput {
            project_root: root,
            config_text: "",
            overrides: Overrides::default(),
            env: &Environment::default(),
            process: &ScriptedRunner::new(),
        })
        .expect("run_validation");
        assert_eq!(out.project_type, ProjectType::Generic);
        assert_eq!(out.envelope.schema, SCHEMA_REPORT_V1);
        // No CHANGELOG.md: the blocking changelog check fails.
        assert_eq!(out.envelope.report.verdict, Verdict::NotReady);
    }
}
