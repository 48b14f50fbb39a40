use crate::cache::{CommandCache, CommandResult};
use crate::git::{ScanOutcome, scan_changes};
use crate::process::{ProcessError, ProcessOutput, ProcessRunner};
use camino::Utf8Path;
use releasegate_domain::changes::{ChangeSummary, PathFilter};
use releasegate_domain::classify;
use releasegate_domain::coverage::{evaluate_coverage, parse_coverage};
use releasegate_domain::model::{Action, CheckSpec, CommandTemplate, CoverageFormat, Outcome};
use releasegate_domain::policy::EffectiveConfig;
use releasegate_domain::registry;
use releasegate_repo::{describe_probe, probe_satisfied, run_inspection};
use releasegate_types::{CheckResult, ProjectType};
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

/// Captured tool output kept in a result's detail.
const DETAIL_LIMIT: usize = 500;

/// Breaking changes listed in a result's detail.
const BREAKING_DETAIL_LIMIT: usize = 10;

pub struct RunContext<'a> {
    pub root: &'a Utf8Path,
    pub project_type: ProjectType,
    pub config: &'a EffectiveConfig,
    pub process: &'a dyn ProcessRunner,
}

#[derive(Clone, Debug)]
pub struct RunOutput {
    /// One result per registry check, in registry order.
    pub results: Vec<CheckResult>,
    /// `None` when the change scan was disabled or could not run.
    pub changes: Option<ChangeSummary>,
}

/// Run every check registered for the project type.
///
/// Never fails: a check that cannot complete is reported through its own status.
pub fn run_checks(ctx: &RunContext<'_>) -> RunOutput {
    let started = Instant::now();
    let mut cache = CommandCache::new(ctx.process, ctx.root, ctx.config.command_timeout);
    let mut results = Vec::new();
    let mut changes = None;

    for spec in registry::checks_for(ctx.project_type) {
        let blocking = ctx.config.is_blocking(spec);

        let outcome = if !ctx.config.is_enabled(spec.id) {
            Outcome::skip("Disabled by configuration")
        } else if ctx.config.deadline.is_some_and(|d| started.elapsed() >= d) {
            warn!(check = spec.id, "run deadline exceeded; skipping");
            Outcome::skip("Run deadline exceeded before this check started")
        } else {
            match spec.action {
                Action::Inspect(inspection) => {
                    match run_inspection(ctx.root, ctx.project_type, inspection) {
                        Ok(outcome) => outcome,
                        Err(e) => Outcome::fail(format!("Inspection failed: {e:#}")),
                    }
                }
                Action::Command(commands) => {
                    command_check(&mut cache, ctx.root, spec, commands, blocking)
                }
                Action::Coverage { commands, format } => coverage_check(
                    &mut cache,
                    ctx.root,
                    spec,
                    commands,
                    format,
                    ctx.config.coverage_threshold,
                    blocking,
                ),
                Action::ChangeScan => {
                    let (outcome, summary) = change_scan(&mut cache, ctx.config, spec);
                    changes = summary;
                    outcome
                }
            }
        };

        let result = classify(spec.id, blocking, outcome);
        info!(
            check = %result.id,
            status = result.status.as_str(),
            blocking = result.blocking,
            "{}",
            result.message
        );
        results.push(result);
    }

    RunOutput { results, changes }
}

enum Selected {
    Ran {
        template: &'static CommandTemplate,
        result: CommandResult,
    },
    /// Skip outcome explaining why nothing ran.
    Unavailable(Outcome),
}

/// Run the first applicable alternative; a missing tool falls through to the next one.
fn select_and_run(
    cache: &mut CommandCache<'_>,
    root: &Utf8Path,
    spec: &CheckSpec,
    commands: &'static [CommandTemplate],
) -> Selected {
    let mut missing = Vec::new();
    let mut applicable = false;

    for template in commands {
        if !probe_satisfied(root, &template.requires) {
            continue;
        }
        applicable = true;
        let result = cache.run(template.argv);
        if let Err(ProcessError::NotFound { program }) = &*result {
            warn!(check = spec.id, %program, "tool not installed");
            missing.push(program.clone());
            continue;
        }
        return Selected::Ran { template, result };
    }

    if !applicable {
        let needs = commands
            .first()
            .map(|t| describe_probe(&t.requires))
            .unwrap_or_default();
        return Selected::Unavailable(Outcome::skip(format!(
            "No {} configuration found (requires {needs})",
            spec.id
        )));
    }
    Selected::Unavailable(
        Outcome::skip(format!("Tool not installed: {}", missing.join(", ")))
            .with_detail(format!("See `releasegate explain {}`", spec.id))
            .with_data(json!({ "missing_tools": missing })),
    )
}

fn command_check(
    cache: &mut CommandCache<'_>,
    root: &Utf8Path,
    spec: &CheckSpec,
    commands: &'static [CommandTemplate],
    blocking: bool,
) -> Outcome {
    let (template, result) = match select_and_run(cache, root, spec, commands) {
        Selected::Ran { template, result } => (template, result),
        Selected::Unavailable(outcome) => return outcome,
    };
    let command = template.display();
    match &*result {
        Ok(out) if out.success() => Outcome::pass(format!("`{command}` passed"))
            .with_data(json!({ "command": command, "exit_code": out.exit_code })),
        Ok(out) => Outcome::fail(format!("`{command}` failed{}", exit_suffix(out)))
            .with_detail(excerpt(out))
            .with_data(json!({ "command": command, "exit_code": out.exit_code })),
        Err(e) => process_failure(spec, &command, e, blocking, cache),
    }
}

fn coverage_check(
    cache: &mut CommandCache<'_>,
    root: &Utf8Path,
    spec: &CheckSpec,
    commands: &'static [CommandTemplate],
    format: CoverageFormat,
    threshold: f64,
    blocking: bool,
) -> Outcome {
    let (template, result) = match select_and_run(cache, root, spec, commands) {
        Selected::Ran { template, result } => (template, result),
        Selected::Unavailable(outcome) => return outcome,
    };
    let command = template.display();
    match &*result {
        Ok(out) if out.success() => {
            let combined = format!("{}\n{}", out.stdout, out.stderr);
            evaluate_coverage(parse_coverage(format, &combined), threshold)
        }
        Ok(out) => Outcome::skip(format!(
            "`{command}` failed{}; coverage not measured",
            exit_suffix(out)
        )),
        Err(e) => process_failure(spec, &command, e, blocking, cache),
    }
}

fn process_failure(
    spec: &CheckSpec,
    command: &str,
    err: &ProcessError,
    blocking: bool,
    cache: &CommandCache<'_>,
) -> Outcome {
    match err {
        ProcessError::TimedOut { .. } => {
            warn!(check = spec.id, %command, "command timed out");
            let message = format!(
                "`{command}` timed out after {}s",
                cache.timeout().as_secs()
            );
            if blocking {
                Outcome::fail(message)
            } else {
                Outcome::skip(message)
            }
        }
        other => Outcome::fail(other.to_string()),
    }
}

fn change_scan(
    cache: &mut CommandCache<'_>,
    config: &EffectiveConfig,
    spec: &CheckSpec,
) -> (Outcome, Option<ChangeSummary>) {
    let filter = match PathFilter::new(config.ignore_patterns(spec.id)) {
        Ok(filter) => filter,
        Err(e) => return (Outcome::fail(format!("{e:#}")), None),
    };
    let summary = match scan_changes(cache, &filter) {
        ScanOutcome::Scanned(summary) => summary,
        ScanOutcome::Unavailable(reason) => return (Outcome::skip(reason), None),
    };

    let data = json!({
        "base_ref": summary.base_ref,
        "total_changes": summary.total_changes,
        "breaking": summary.breaking.len(),
        "new_top_level": summary.new_top_level,
    });
    let outcome = if summary.breaking.is_empty() {
        Outcome::pass(format!("No breaking changes since {}", summary.base_ref))
    } else {
        let listed: Vec<String> = summary
            .breaking
            .iter()
            .take(BREAKING_DETAIL_LIMIT)
            .map(ToString::to_string)
            .collect();
        Outcome::fail(format!(
            "Found {} potential breaking change(s) since {}",
            summary.breaking.len(),
            summary.base_ref
        ))
        .with_detail(listed.join("\n"))
    };
    (outcome.with_data(data), Some(summary))
}

fn exit_suffix(out: &ProcessOutput) -> String {
    match out.exit_code {
        Some(code) => format!(" (exit {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

/// Leading part of the most relevant output stream.
fn excerpt(out: &ProcessOutput) -> String {
    let text = if out.stdout.trim().is_empty() {
        out.stderr.trim()
    } else {
        out.stdout.trim()
    };
    match text.char_indices().nth(DETAIL_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
